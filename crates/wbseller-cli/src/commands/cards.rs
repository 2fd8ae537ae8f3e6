use serde_json::Value;
use wbseller_core::{PageMode, SellerApi};

use crate::cli::CardsArgs;
use crate::error::CliError;

use super::parse_json_arg;

pub fn run(args: &CardsArgs, api: &SellerApi) -> Result<Value, CliError> {
    let settings = parse_json_arg("settings", &args.settings)?;
    if !settings.is_object() {
        return Err(CliError::InvalidInput(String::from(
            "--settings must be a JSON object",
        )));
    }

    let mode = if args.all {
        PageMode::AllPages
    } else {
        PageMode::SinglePage
    };

    Ok(api.cards(settings, mode)?.into_value())
}

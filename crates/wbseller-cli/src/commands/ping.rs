use serde_json::Value;
use wbseller_core::SellerApi;

use crate::cli::PingArgs;
use crate::error::CliError;

pub fn run(args: &PingArgs, api: &SellerApi) -> Result<Value, CliError> {
    Ok(api.ping(args.service)?)
}

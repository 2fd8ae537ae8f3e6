mod cards;
mod ping;
mod request;

use std::sync::Arc;

use serde_json::Value;
use tracing::info;
use wbseller_core::{ClientConfig, ReqwestHttpClient, RequestDispatcher, SellerApi};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// File values (when `--config` is given), then environment, then `--sandbox`.
pub fn load_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    let mut config = config.apply_env()?;
    if cli.sandbox {
        config.sandbox = true;
    }
    Ok(config)
}

pub fn run(cli: &Cli, config: &ClientConfig) -> Result<Value, CliError> {
    let dispatcher = RequestDispatcher::from_config(config, Arc::new(ReqwestHttpClient::new()))?;
    let api = SellerApi::new(dispatcher);
    info!(
        environment = %config.environment(),
        token_present = config.token.is_some(),
        "wbseller client ready"
    );

    match &cli.command {
        Command::Ping(args) => ping::run(args, &api),
        Command::Get(args) => request::run_get(args, &api),
        Command::Post(args) => request::run_post(args, &api),
        Command::Cards(args) => cards::run(args, &api),
    }
}

fn parse_json_arg(name: &str, raw: &str) -> Result<Value, CliError> {
    serde_json::from_str(raw)
        .map_err(|error| CliError::InvalidInput(format!("--{name} is not valid JSON: {error}")))
}

//! CLI argument definitions for wbseller.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ping` | Check connectivity and token validity for a service |
//! | `get` | Raw `GET` against any service endpoint |
//! | `post` | Raw `POST` with a JSON body |
//! | `cards` | List product cards, optionally walking every page |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--config` | none | TOML config file |
//! | `--sandbox` | `false` | Force the sandbox environment |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--log-format` | `pretty` | Log line format on stderr |
//!
//! # Examples
//!
//! ```bash
//! WILDBERRIES_API_TOKEN=... wbseller ping --service content
//! wbseller get /api/v3/orders --service marketplace -q limit=10 -q next=0
//! wbseller cards --all --settings '{"filter":{"textSearch":"dress"}}' --pretty
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use wbseller_core::ServiceName;

/// wbseller - Wildberries seller API client
#[derive(Debug, Parser)]
#[command(name = "wbseller", author, version, about = "Wildberries seller API client")]
pub struct Cli {
    /// TOML config file; environment variables override its values.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use the sandbox base URLs regardless of configuration.
    #[arg(long, global = true, default_value_t = false)]
    pub sandbox: bool,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log line format written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ping a service.
    Ping(PingArgs),
    /// Send a GET request.
    Get(GetArgs),
    /// Send a POST request with a JSON body.
    Post(PostArgs),
    /// List product cards.
    Cards(CardsArgs),
}

#[derive(Debug, Args)]
pub struct PingArgs {
    #[arg(long, default_value = "common", value_parser = parse_service)]
    pub service: ServiceName,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Endpoint path, e.g. `/api/v3/warehouses`.
    pub endpoint: String,

    #[arg(long, default_value = "common", value_parser = parse_service)]
    pub service: ServiceName,

    /// Query parameter as `key=value`; repeatable.
    #[arg(short = 'q', long = "query", value_parser = parse_query_pair)]
    pub query: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct PostArgs {
    pub endpoint: String,

    #[arg(long, default_value = "common", value_parser = parse_service)]
    pub service: ServiceName,

    /// JSON request body.
    #[arg(long, default_value = "{}")]
    pub body: String,
}

#[derive(Debug, Args)]
pub struct CardsArgs {
    /// Follow the cursor through every page.
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// JSON settings merged over the defaults.
    #[arg(long, default_value = "{}")]
    pub settings: String,
}

fn parse_service(raw: &str) -> Result<ServiceName, String> {
    raw.parse::<ServiceName>().map_err(|error| error.to_string())
}

fn parse_query_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

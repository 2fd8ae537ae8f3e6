//! stderr logging setup.
//!
//! `RUST_LOG` wins when set. Otherwise the filter is the configured level when
//! `logging.enabled` is true, and `warn` when it is not.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wbseller_core::LoggingConfig;

use crate::cli::LogFormat;

pub fn init_logging(config: &LoggingConfig, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let subscriber = tracing_subscriber::registry().with(filter);

    // A second initialization (e.g. from tests) is not an error worth reporting.
    let _ = match format {
        LogFormat::Pretty => subscriber
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
}

fn default_directive(config: &LoggingConfig) -> String {
    if config.enabled {
        config.level.clone()
    } else {
        String::from("warn")
    }
}

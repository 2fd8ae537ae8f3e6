use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] wbseller_core::ConfigError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Api(#[from] wbseller_core::ApiError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::InvalidInput(_) => 2,
            Self::Api(_) => 3,
            Self::Serialization(_) => 4,
        }
    }
}

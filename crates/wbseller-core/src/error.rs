use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// Closed classification of failed API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Missing token (status 0) or HTTP 401.
    Authentication,
    /// HTTP 429.
    RateLimit,
    /// Any other non-2xx response.
    Generic,
    /// The exchange never produced a usable response.
    Transport,
}

/// Typed failure surfaced by every dispatcher operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    kind: ApiErrorKind,
    status: u16,
    message: String,
    errors: Vec<Value>,
}

impl ApiError {
    pub const DEFAULT_AUTHENTICATION_MESSAGE: &'static str = "Authentication failed";
    pub const DEFAULT_RATE_LIMIT_MESSAGE: &'static str = "Rate limit exceeded";
    pub const DEFAULT_GENERIC_MESSAGE: &'static str = "Unknown API error";
    pub const MISSING_TOKEN_MESSAGE: &'static str = "API token is required";

    pub fn authentication(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Authentication,
            status: 401,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Local refusal to dispatch without a token; no exchange happened, so
    /// the status is 0.
    pub fn missing_token() -> Self {
        Self {
            kind: ApiErrorKind::Authentication,
            status: 0,
            message: String::from(Self::MISSING_TOKEN_MESSAGE),
            errors: Vec::new(),
        }
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::RateLimit,
            status: 429,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn generic(status: u16, message: impl Into<String>, errors: Vec<Value>) -> Self {
        Self {
            kind: ApiErrorKind::Generic,
            status,
            message: message.into(),
            errors,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            status: 0,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// HTTP status of the failed exchange, `0` when none was received.
    pub const fn status(&self) -> u16 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Sub-errors reported by the server in the body's `errors` field.
    pub fn errors(&self) -> &[Value] {
        &self.errors
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ApiErrorKind::Authentication => "api.authentication",
            ApiErrorKind::RateLimit => "api.rate_limit",
            ApiErrorKind::Generic => "api.generic",
            ApiErrorKind::Transport => "api.transport",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, status {})", self.message, self.code(), self.status)
    }
}

impl std::error::Error for ApiError {}

/// Configuration and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "unknown service '{value}', expected one of common, content, marketplace, statistics, \
advert, feedbacks, chat, supplies, returns, documents, finance"
    )]
    UnknownService { value: String },

    #[error("environment variable {name} has invalid value '{value}'")]
    InvalidEnvValue { name: &'static str, value: String },

    #[error("http.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

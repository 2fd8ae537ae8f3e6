//! Client configuration.
//!
//! Values come from a TOML file, environment variables, or both (environment
//! wins). Every field has a default, so an empty file is a valid config.
//!
//! # Environment Variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `WILDBERRIES_API_TOKEN` | `token` |
//! | `WILDBERRIES_SANDBOX` | `sandbox` |
//! | `WILDBERRIES_LOGGING` | `logging.enabled` |
//! | `WILDBERRIES_LOG_LEVEL` | `logging.level` |
//!
//! # Example
//!
//! ```toml
//! token = "..."
//! sandbox = true
//!
//! [base_urls.sandbox]
//! content = "http://localhost:8080"
//!
//! [http]
//! timeout_secs = 10
//! ```

use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::service::{Environment, ServiceName};

pub const TOKEN_ENV: &str = "WILDBERRIES_API_TOKEN";
pub const SANDBOX_ENV: &str = "WILDBERRIES_SANDBOX";
pub const LOGGING_ENV: &str = "WILDBERRIES_LOGGING";
pub const LOG_LEVEL_ENV: &str = "WILDBERRIES_LOG_LEVEL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub token: Option<String>,
    pub sandbox: bool,
    pub base_urls: BaseUrlOverrides,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Per-environment base URL overrides keyed by service name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseUrlOverrides {
    pub production: BTreeMap<String, String>,
    pub sandbox: BTreeMap<String, String>,
}

impl BaseUrlOverrides {
    pub fn for_environment(&self, environment: Environment) -> &BTreeMap<String, String> {
        match environment {
            Environment::Production => &self.production,
            Environment::Sandbox => &self.sandbox,
        }
    }
}

/// Transport knobs. The retry fields are carried for transports that want
/// them; the dispatcher itself never retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            retry_attempts: 3,
            retry_delay_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: String::from("info"),
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env()
    }

    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_with(|name| env::var(name).ok())
    }

    /// Overlays values produced by `lookup`; unset or blank variables are skipped.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(token) = lookup(TOKEN_ENV) {
            self.token = Some(token.trim().to_owned());
        }
        if let Some(value) = lookup(SANDBOX_ENV) {
            self.sandbox = parse_flag(SANDBOX_ENV, &value)?;
        }
        if let Some(value) = lookup(LOGGING_ENV) {
            self.logging.enabled = parse_flag(LOGGING_ENV, &value)?;
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.logging.level = level.trim().to_ascii_lowercase();
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        self.overrides_for(Environment::Production)?;
        self.overrides_for(Environment::Sandbox)?;
        Ok(())
    }

    pub const fn environment(&self) -> Environment {
        Environment::from_sandbox_flag(self.sandbox)
    }

    /// Typed overrides for the active environment.
    pub fn base_url_overrides(&self) -> Result<Vec<(ServiceName, String)>, ConfigError> {
        self.overrides_for(self.environment())
    }

    pub fn timeout_ms(&self) -> u64 {
        self.http.timeout_secs.saturating_mul(1_000)
    }

    fn overrides_for(
        &self,
        environment: Environment,
    ) -> Result<Vec<(ServiceName, String)>, ConfigError> {
        self.base_urls
            .for_environment(environment)
            .iter()
            .map(|(name, url)| Ok((name.parse::<ServiceName>()?, url.clone())))
            .collect()
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnvValue {
            name,
            value: value.to_owned(),
        }),
    }
}

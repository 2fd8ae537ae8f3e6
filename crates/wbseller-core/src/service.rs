use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Independently hosted seller API surfaces, each with its own base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceName {
    Common,
    Content,
    Marketplace,
    Statistics,
    Advert,
    Feedbacks,
    Chat,
    Supplies,
    Returns,
    Documents,
    Finance,
}

impl ServiceName {
    pub const ALL: [Self; 11] = [
        Self::Common,
        Self::Content,
        Self::Marketplace,
        Self::Statistics,
        Self::Advert,
        Self::Feedbacks,
        Self::Chat,
        Self::Supplies,
        Self::Returns,
        Self::Documents,
        Self::Finance,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Content => "content",
            Self::Marketplace => "marketplace",
            Self::Statistics => "statistics",
            Self::Advert => "advert",
            Self::Feedbacks => "feedbacks",
            Self::Chat => "chat",
            Self::Supplies => "supplies",
            Self::Returns => "returns",
            Self::Documents => "documents",
            Self::Finance => "finance",
        }
    }

    /// Host prefix shared by the production and sandbox hostnames.
    const fn host_prefix(self) -> &'static str {
        match self {
            Self::Chat => "buyer-chat-api",
            Self::Common => "common-api",
            Self::Content => "content-api",
            Self::Marketplace => "marketplace-api",
            Self::Statistics => "statistics-api",
            Self::Advert => "advert-api",
            Self::Feedbacks => "feedbacks-api",
            Self::Supplies => "supplies-api",
            Self::Returns => "returns-api",
            Self::Documents => "documents-api",
            Self::Finance => "finance-api",
        }
    }

    /// Built-in base URL for this service in the given environment.
    pub fn default_base_url(self, environment: Environment) -> String {
        match environment {
            Environment::Production => {
                format!("https://{}.wildberries.ru", self.host_prefix())
            }
            Environment::Sandbox => {
                format!("https://{}-sandbox.wildberries.ru", self.host_prefix())
            }
        }
    }
}

impl Display for ServiceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceName {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "common" => Ok(Self::Common),
            "content" => Ok(Self::Content),
            "marketplace" => Ok(Self::Marketplace),
            "statistics" => Ok(Self::Statistics),
            "advert" => Ok(Self::Advert),
            "feedbacks" => Ok(Self::Feedbacks),
            "chat" => Ok(Self::Chat),
            "supplies" => Ok(Self::Supplies),
            "returns" => Ok(Self::Returns),
            "documents" => Ok(Self::Documents),
            "finance" => Ok(Self::Finance),
            other => Err(ConfigError::UnknownService {
                value: other.to_owned(),
            }),
        }
    }
}

/// Which set of base URLs a dispatcher talks to. Fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub const fn from_sandbox_flag(sandbox: bool) -> Self {
        if sandbox {
            Self::Sandbox
        } else {
            Self::Production
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Sandbox => "sandbox",
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

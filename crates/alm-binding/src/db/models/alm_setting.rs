//! ALM setting database model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// ALM provider type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlmProvider {
    Github,
    Gitlab,
    Bitbucket,
    AzureDevops,
}

impl AlmProvider {
    /// Column value used in `alm.alm_setting.alm`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlmProvider::Github => "github",
            AlmProvider::Gitlab => "gitlab",
            AlmProvider::Bitbucket => "bitbucket",
            AlmProvider::AzureDevops => "azure_devops",
        }
    }
}

impl fmt::Display for AlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored provider name is not recognized.
#[derive(Debug, Error)]
#[error("unknown ALM provider '{0}'")]
pub struct UnknownAlmProvider(pub String);

impl FromStr for AlmProvider {
    type Err = UnknownAlmProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github" => Ok(AlmProvider::Github),
            "gitlab" => Ok(AlmProvider::Gitlab),
            "bitbucket" => Ok(AlmProvider::Bitbucket),
            "azure_devops" | "azure" => Ok(AlmProvider::AzureDevops),
            other => Err(UnknownAlmProvider(other.to_string())),
        }
    }
}

impl TryFrom<String> for AlmProvider {
    type Error = UnknownAlmProvider;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An ALM provider configuration, read-only from this service.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AlmSetting {
    /// Internal identifier
    pub id: Uuid,

    /// Unique human-readable key
    pub key: String,

    /// Provider type
    #[sqlx(try_from = "String")]
    pub alm: AlmProvider,

    /// Provider credentials (app id, private key, tokens...)
    #[sqlx(default)]
    #[serde(default, skip_serializing)]
    pub credentials: Option<serde_json::Value>,
}

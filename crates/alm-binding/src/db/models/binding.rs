//! Project ALM binding model and the request/response types built on it.
//!
//! A project has at most one binding. Writes always replace the whole
//! record; there is no field-level update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::AlmProvider;
use crate::error::{AppError, AppResult};

/// Maximum accepted length of the repository identifier and slug.
pub const MAX_REPOSITORY_LENGTH: usize = 256;

/// Stored binding between a project and an ALM setting.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ProjectAlmBinding {
    /// Bound project (unique)
    pub project_id: Uuid,

    /// Referenced ALM setting
    pub alm_setting_id: Uuid,

    /// Provider repository identifier, e.g. `org/repo`
    pub repository: String,

    /// Provider-specific secondary identifier
    #[sqlx(default)]
    pub slug: Option<String>,

    /// Creation timestamp, kept across replacements
    pub created_at: DateTime<Utc>,

    /// Last replacement timestamp
    pub updated_at: DateTime<Utc>,
}

/// Full content of a binding write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProjectAlmBinding {
    pub project_id: Uuid,
    pub alm_setting_id: Uuid,
    pub repository: String,
    pub slug: Option<String>,
}

/// Parameter constraints checked when a request enters the API.
pub trait Validate: Sized {
    /// Check constraints and return the normalized request.
    fn validate(self) -> AppResult<Self>;
}

/// Request to bind a project to an ALM setting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBindingRequest {
    /// ALM setting key
    pub alm_setting: String,

    /// Project key
    pub project: String,

    /// Repository identifier
    pub repository: String,

    /// Optional provider slug
    #[serde(default)]
    pub slug: Option<String>,
}

impl Validate for SetBindingRequest {
    /// Also normalizes an empty slug to `None`.
    fn validate(mut self) -> AppResult<Self> {
        require("almSetting", &self.alm_setting)?;
        require("project", &self.project)?;
        require("repository", &self.repository)?;
        max_length("repository", &self.repository, MAX_REPOSITORY_LENGTH)?;

        self.slug = self.slug.filter(|s| !s.trim().is_empty());
        if let Some(slug) = &self.slug {
            max_length("slug", slug, MAX_REPOSITORY_LENGTH)?;
        }
        Ok(self)
    }
}

/// Request to remove a project's binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBindingRequest {
    /// Project key
    pub project: String,
}

impl Validate for DeleteBindingRequest {
    fn validate(self) -> AppResult<Self> {
        require("project", &self.project)?;
        Ok(self)
    }
}

/// Query for counting the projects bound to a setting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountBindingQuery {
    /// ALM setting key
    pub alm_setting: String,
}

impl Validate for CountBindingQuery {
    fn validate(self) -> AppResult<Self> {
        require("almSetting", &self.alm_setting)?;
        Ok(self)
    }
}

/// Query for reading a project's binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBindingQuery {
    /// Project key
    pub project: String,
}

impl Validate for GetBindingQuery {
    fn validate(self) -> AppResult<Self> {
        require("project", &self.project)?;
        Ok(self)
    }
}

/// Number of projects bound to a setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountBindingResponse {
    /// ALM setting key
    pub key: String,

    /// Number of bound projects
    pub projects: i64,
}

/// A project's binding joined with its ALM setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingResponse {
    /// ALM setting key
    pub key: String,

    /// Provider type of the setting
    pub alm: AlmProvider,

    /// Repository identifier
    pub repository: String,

    /// Provider slug
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

fn require(name: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "The '{}' parameter is missing",
            name
        )));
    }
    Ok(())
}

fn max_length(name: &str, value: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "The '{}' parameter must not exceed {} characters",
            name, max
        )));
    }
    Ok(())
}

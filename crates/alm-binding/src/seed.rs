//! JSON seed for the memory backend.
//!
//! ```json
//! {
//!   "projects": [{"key": "P1", "name": "Project 1"}],
//!   "almSettings": [{"key": "gh-1", "alm": "github"}],
//!   "systemAdmins": ["root"],
//!   "projectAdmins": [{"login": "alice", "project": "P1"}]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::auth::StaticPermissions;
use crate::db::models::AlmProvider;
use crate::error::{AppError, AppResult};
use crate::store::MemoryStore;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seed {
    #[serde(default)]
    pub projects: Vec<SeedProject>,
    #[serde(default)]
    pub alm_settings: Vec<SeedAlmSetting>,
    #[serde(default)]
    pub system_admins: Vec<String>,
    #[serde(default)]
    pub project_admins: Vec<SeedProjectAdmin>,
}

#[derive(Debug, Deserialize)]
pub struct SeedProject {
    pub key: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SeedAlmSetting {
    pub key: String,
    pub alm: AlmProvider,
    #[serde(default)]
    pub credentials: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct SeedProjectAdmin {
    pub login: String,
    pub project: String,
}

impl Seed {
    pub fn from_json(content: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub async fn from_file(path: &Path) -> AppResult<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Config(format!("failed to read seed file {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Populate a fresh memory store and the matching grants.
    pub async fn apply(self) -> AppResult<(MemoryStore, StaticPermissions)> {
        let store = MemoryStore::new();
        let mut project_ids = HashMap::new();

        for project in self.projects {
            let created = store
                .insert_project(&project.key, &project.name)
                .await
                .map_err(invalid_seed)?;
            project_ids.insert(created.key, created.id);
        }
        for setting in self.alm_settings {
            store
                .insert_alm_setting(&setting.key, setting.alm, setting.credentials)
                .await
                .map_err(invalid_seed)?;
        }

        let mut permissions = StaticPermissions::new();
        for login in self.system_admins {
            permissions = permissions.with_system_admin(login);
        }
        for grant in self.project_admins {
            let project_id = project_ids.get(&grant.project).ok_or_else(|| {
                AppError::Config(format!(
                    "seed grants '{}' admin on unknown project '{}'",
                    grant.login, grant.project
                ))
            })?;
            permissions = permissions.with_project_admin(grant.login, *project_id);
        }

        tracing::info!(projects = project_ids.len(), "Memory store seeded");
        Ok((store, permissions))
    }
}

fn invalid_seed(err: AppError) -> AppError {
    AppError::Config(format!("invalid seed: {}", err))
}

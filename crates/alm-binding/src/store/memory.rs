//! In-process store.
//!
//! A unit of work holds the store lock for its whole lifetime and edits a
//! private copy of the data; `commit` swaps the copy in. Units of work are
//! therefore fully serialized, and a dropped unit discards its copy.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;
use uuid::Uuid;

use super::{Store, UnitOfWork};
use crate::db::models::{
    AlmProvider, AlmSetting, NewProjectAlmBinding, Project, ProjectAlmBinding,
};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
struct Tables {
    projects: HashMap<Uuid, Project>,
    alm_settings: HashMap<Uuid, AlmSetting>,
    bindings: HashMap<Uuid, ProjectAlmBinding>,
}

/// Store keeping every table in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project and return it. Project keys are unique.
    pub async fn insert_project(&self, key: &str, name: &str) -> AppResult<Project> {
        let mut tables = self.tables.lock().await;
        if tables.projects.values().any(|p| p.key == key) {
            return Err(AppError::Conflict(format!(
                "Project key '{}' already exists",
                key
            )));
        }

        let project = Project {
            id: Uuid::new_v4(),
            key: key.to_string(),
            name: name.to_string(),
        };
        tables.projects.insert(project.id, project.clone());
        Ok(project)
    }

    /// Register an ALM setting and return it. Setting keys are unique.
    pub async fn insert_alm_setting(
        &self,
        key: &str,
        alm: AlmProvider,
        credentials: Option<serde_json::Value>,
    ) -> AppResult<AlmSetting> {
        let mut tables = self.tables.lock().await;
        if tables.alm_settings.values().any(|s| s.key == key) {
            return Err(AppError::Conflict(format!(
                "ALM setting key '{}' already exists",
                key
            )));
        }

        let setting = AlmSetting {
            id: Uuid::new_v4(),
            key: key.to_string(),
            alm,
            credentials,
        };
        tables.alm_settings.insert(setting.id, setting.clone());
        Ok(setting)
    }

    /// Committed binding of a project.
    pub async fn binding(&self, project_id: Uuid) -> Option<ProjectAlmBinding> {
        self.tables.lock().await.bindings.get(&project_id).cloned()
    }

    /// Number of committed bindings.
    pub async fn binding_count(&self) -> usize {
        self.tables.lock().await.bindings.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        let guard = self.tables.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryUnitOfWork { guard, working }))
    }
}

/// Exclusive unit of work over a [`MemoryStore`].
pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn find_project_by_key(&mut self, key: &str) -> AppResult<Option<Project>> {
        Ok(self
            .working
            .projects
            .values()
            .find(|p| p.key == key)
            .cloned())
    }

    async fn find_alm_setting_by_key(&mut self, key: &str) -> AppResult<Option<AlmSetting>> {
        Ok(self
            .working
            .alm_settings
            .values()
            .find(|s| s.key == key)
            .cloned())
    }

    async fn find_alm_setting_by_id(&mut self, id: Uuid) -> AppResult<Option<AlmSetting>> {
        Ok(self.working.alm_settings.get(&id).cloned())
    }

    async fn find_binding_by_project(
        &mut self,
        project_id: Uuid,
    ) -> AppResult<Option<ProjectAlmBinding>> {
        Ok(self.working.bindings.get(&project_id).cloned())
    }

    async fn upsert_binding(
        &mut self,
        binding: NewProjectAlmBinding,
    ) -> AppResult<ProjectAlmBinding> {
        if !self.working.projects.contains_key(&binding.project_id) {
            return Err(AppError::Internal(format!(
                "Binding references unknown project {}",
                binding.project_id
            )));
        }
        if !self.working.alm_settings.contains_key(&binding.alm_setting_id) {
            return Err(AppError::Internal(format!(
                "Binding references unknown ALM setting {}",
                binding.alm_setting_id
            )));
        }

        let now = Utc::now();
        let created_at = self
            .working
            .bindings
            .get(&binding.project_id)
            .map(|existing| existing.created_at)
            .unwrap_or(now);

        let stored = ProjectAlmBinding {
            project_id: binding.project_id,
            alm_setting_id: binding.alm_setting_id,
            repository: binding.repository,
            slug: binding.slug,
            created_at,
            updated_at: now,
        };
        self.working
            .bindings
            .insert(stored.project_id, stored.clone());
        Ok(stored)
    }

    async fn delete_binding_by_project(&mut self, project_id: Uuid) -> AppResult<bool> {
        Ok(self.working.bindings.remove(&project_id).is_some())
    }

    async fn count_bindings_by_alm_setting(&mut self, alm_setting_id: Uuid) -> AppResult<i64> {
        let count = self
            .working
            .bindings
            .values()
            .filter(|b| b.alm_setting_id == alm_setting_id)
            .count();
        Ok(count as i64)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryUnitOfWork { mut guard, working } = *self;
        *guard = working;
        debug!(bindings = guard.bindings.len(), "Memory unit of work committed");
        Ok(())
    }
}

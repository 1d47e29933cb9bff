//! PostgreSQL store backed by SQLx transactions.

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use super::{Store, UnitOfWork};
use crate::db::models::{AlmSetting, NewProjectAlmBinding, Project, ProjectAlmBinding};
use crate::db::queries::{alm_setting, binding, project};
use crate::db::DbPool;
use crate::error::AppResult;

/// Store whose units of work are database transactions.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }
}

/// Open transaction. Rolled back on drop unless committed.
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn find_project_by_key(&mut self, key: &str) -> AppResult<Option<Project>> {
        project::get_project_by_key(&mut *self.tx, key).await
    }

    async fn find_alm_setting_by_key(&mut self, key: &str) -> AppResult<Option<AlmSetting>> {
        alm_setting::get_alm_setting_by_key(&mut *self.tx, key).await
    }

    async fn find_alm_setting_by_id(&mut self, id: Uuid) -> AppResult<Option<AlmSetting>> {
        alm_setting::get_alm_setting_by_id(&mut *self.tx, id).await
    }

    async fn find_binding_by_project(
        &mut self,
        project_id: Uuid,
    ) -> AppResult<Option<ProjectAlmBinding>> {
        binding::get_binding_by_project(&mut *self.tx, project_id).await
    }

    async fn upsert_binding(
        &mut self,
        new_binding: NewProjectAlmBinding,
    ) -> AppResult<ProjectAlmBinding> {
        binding::upsert_binding(&mut *self.tx, &new_binding).await
    }

    async fn delete_binding_by_project(&mut self, project_id: Uuid) -> AppResult<bool> {
        binding::delete_binding_by_project(&mut *self.tx, project_id).await
    }

    async fn count_bindings_by_alm_setting(&mut self, alm_setting_id: Uuid) -> AppResult<i64> {
        binding::count_bindings_by_alm_setting(&mut *self.tx, alm_setting_id).await
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

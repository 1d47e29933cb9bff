//! Binding store abstraction.
//!
//! Every service call opens exactly one [`UnitOfWork`], performs its reads
//! and writes through it, and commits it at most once. A unit of work that
//! is dropped without `commit` leaves the store untouched.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::models::{AlmSetting, NewProjectAlmBinding, Project, ProjectAlmBinding};
use crate::error::AppResult;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Source of units of work.
#[async_trait]
pub trait Store: Send + Sync {
    /// Open a new unit of work.
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>>;
}

/// One atomic unit of work against the store.
#[async_trait]
pub trait UnitOfWork: Send {
    /// Resolve a project by key.
    async fn find_project_by_key(&mut self, key: &str) -> AppResult<Option<Project>>;

    /// Resolve an ALM setting by key.
    async fn find_alm_setting_by_key(&mut self, key: &str) -> AppResult<Option<AlmSetting>>;

    /// Resolve an ALM setting by id.
    async fn find_alm_setting_by_id(&mut self, id: Uuid) -> AppResult<Option<AlmSetting>>;

    /// Get the binding of a project, if any.
    async fn find_binding_by_project(
        &mut self,
        project_id: Uuid,
    ) -> AppResult<Option<ProjectAlmBinding>>;

    /// Insert or wholly replace the binding keyed by `binding.project_id`.
    async fn upsert_binding(&mut self, binding: NewProjectAlmBinding)
        -> AppResult<ProjectAlmBinding>;

    /// Delete the binding of a project. Returns whether one existed.
    async fn delete_binding_by_project(&mut self, project_id: Uuid) -> AppResult<bool>;

    /// Number of bindings referencing an ALM setting.
    async fn count_bindings_by_alm_setting(&mut self, alm_setting_id: Uuid) -> AppResult<i64>;

    /// Make every write of this unit visible.
    async fn commit(self: Box<Self>) -> AppResult<()>;
}

use std::collections::HashSet;

use async_trait::async_trait;
use uuid::Uuid;

use super::Actor;
use crate::db::models::Project;
use crate::db::queries::permission as queries;
use crate::db::DbPool;
use crate::error::AppResult;

/// Capability checks consulted before every binding operation.
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    /// Whether the actor may administer the project.
    async fn has_project_admin(&self, actor: &Actor, project: &Project) -> AppResult<bool>;

    /// Whether the actor administers the whole system.
    async fn has_system_admin(&self, actor: &Actor) -> AppResult<bool>;
}

/// Checker backed by the `alm.user_account` and `alm.project_permission` tables.
#[derive(Clone)]
pub struct PgPermissionChecker {
    pool: DbPool,
}

impl PgPermissionChecker {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionChecker for PgPermissionChecker {
    async fn has_project_admin(&self, actor: &Actor, project: &Project) -> AppResult<bool> {
        queries::has_project_role(
            &self.pool,
            &actor.login,
            project.id,
            queries::PROJECT_ADMIN_ROLE,
        )
        .await
    }

    async fn has_system_admin(&self, actor: &Actor) -> AppResult<bool> {
        queries::is_system_admin(&self.pool, &actor.login).await
    }
}

/// Fixed set of grants, for tests and the memory backend.
///
/// System administrators are not implicitly project administrators.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    system_admins: HashSet<String>,
    project_admins: HashSet<(String, Uuid)>,
}

impl StaticPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_admin(mut self, login: impl Into<String>) -> Self {
        self.system_admins.insert(login.into());
        self
    }

    pub fn with_project_admin(mut self, login: impl Into<String>, project_id: Uuid) -> Self {
        self.project_admins.insert((login.into(), project_id));
        self
    }
}

#[async_trait]
impl PermissionChecker for StaticPermissions {
    async fn has_project_admin(&self, actor: &Actor, project: &Project) -> AppResult<bool> {
        Ok(self
            .project_admins
            .contains(&(actor.login.clone(), project.id)))
    }

    async fn has_system_admin(&self, actor: &Actor) -> AppResult<bool> {
        Ok(self.system_admins.contains(&actor.login))
    }
}

//! Binding service: permission-gated project ALM binding lifecycle.
//!
//! Each operation opens one unit of work, runs every precondition before any
//! write, and commits once. A failed precondition drops the unit of work, so
//! nothing is persisted.

use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::{Actor, PermissionChecker};
use crate::db::models::{
    AlmSetting, BindingResponse, CountBindingResponse, NewProjectAlmBinding, Project,
    SetBindingRequest,
};
use crate::error::{AppError, AppResult};
use crate::result_ext::ResultExt;
use crate::store::{Store, UnitOfWork};

/// Service for project ALM binding operations.
#[derive(Clone)]
pub struct BindingService {
    store: Arc<dyn Store>,
    permissions: Arc<dyn PermissionChecker>,
}

impl BindingService {
    /// Create a new binding service.
    ///
    /// # Arguments
    ///
    /// * `store` - Store providing units of work
    /// * `permissions` - Capability checker for actors
    pub fn new(store: Arc<dyn Store>, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self { store, permissions }
    }

    /// Bind a project to an ALM setting, replacing any previous binding.
    ///
    /// The stored binding is exactly what the request carries: a request
    /// without a slug clears a previously stored one. The request is expected
    /// to have passed [`Validate`](crate::db::models::Validate) already.
    pub async fn set_binding(&self, actor: &Actor, request: SetBindingRequest) -> AppResult<()> {
        let mut uow = self.store.begin().await?;
        let project = self
            .resolve_project_admin(uow.as_mut(), actor, &request.project)
            .await?;
        let setting = resolve_alm_setting(uow.as_mut(), &request.alm_setting).await?;

        uow.upsert_binding(NewProjectAlmBinding {
            project_id: project.id,
            alm_setting_id: setting.id,
            repository: request.repository,
            slug: request.slug,
        })
        .await
        .log("upserting project binding")?;
        uow.commit().await.log("committing project binding")?;

        info!(
            actor = %actor.login,
            project = %project.key,
            alm_setting = %setting.key,
            "Project bound to ALM setting"
        );
        Ok(())
    }

    /// Remove a project's binding. Removing a missing binding succeeds.
    pub async fn remove_binding(&self, actor: &Actor, project_key: &str) -> AppResult<()> {
        let mut uow = self.store.begin().await?;
        let project = self
            .resolve_project_admin(uow.as_mut(), actor, project_key)
            .await?;

        let deleted = uow
            .delete_binding_by_project(project.id)
            .await
            .log("deleting project binding")?;
        uow.commit().await.log("committing binding removal")?;

        if deleted {
            info!(actor = %actor.login, project = %project.key, "Project binding removed");
        } else {
            debug!(project = %project.key, "Project had no binding to remove");
        }
        Ok(())
    }

    /// Count the projects bound to an ALM setting.
    ///
    /// The system-admin check runs before the setting lookup so that
    /// unauthorized actors cannot probe which settings exist.
    pub async fn count_bindings(
        &self,
        actor: &Actor,
        alm_setting_key: &str,
    ) -> AppResult<CountBindingResponse> {
        if !self.permissions.has_system_admin(actor).await? {
            return Err(AppError::Forbidden);
        }

        let mut uow = self.store.begin().await?;
        let setting = resolve_alm_setting(uow.as_mut(), alm_setting_key).await?;
        let projects = uow.count_bindings_by_alm_setting(setting.id).await?;
        uow.commit().await?;

        Ok(CountBindingResponse {
            key: setting.key,
            projects,
        })
    }

    /// Read a project's binding together with its ALM setting.
    pub async fn get_binding(&self, actor: &Actor, project_key: &str) -> AppResult<BindingResponse> {
        let mut uow = self.store.begin().await?;
        let project = self
            .resolve_project_admin(uow.as_mut(), actor, project_key)
            .await?;

        let binding = uow
            .find_binding_by_project(project.id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Project '{}' is not bound to any ALM",
                    project.key
                ))
            })?;
        let setting = uow
            .find_alm_setting_by_id(binding.alm_setting_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Binding of project '{}' references a missing ALM setting",
                    project.key
                ))
            })?;
        uow.commit().await?;

        Ok(BindingResponse {
            key: setting.key,
            alm: setting.alm,
            repository: binding.repository,
            slug: binding.slug,
        })
    }

    /// Resolve a project and require project admin on it.
    async fn resolve_project_admin(
        &self,
        uow: &mut dyn UnitOfWork,
        actor: &Actor,
        project_key: &str,
    ) -> AppResult<Project> {
        let project = uow
            .find_project_by_key(project_key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project key '{}' not found", project_key)))?;

        if !self.permissions.has_project_admin(actor, &project).await? {
            debug!(actor = %actor.login, "Missing project administer permission");
            return Err(AppError::Forbidden);
        }
        Ok(project)
    }
}

async fn resolve_alm_setting(uow: &mut dyn UnitOfWork, key: &str) -> AppResult<AlmSetting> {
    uow.find_alm_setting_by_key(key).await?.ok_or_else(|| {
        AppError::NotFound(format!("ALM setting with key '{}' cannot be found", key))
    })
}

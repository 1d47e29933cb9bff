#![allow(dead_code)]

use std::sync::Arc;

use alm_binding::auth::{Actor, StaticPermissions};
use alm_binding::db::models::{AlmProvider, AlmSetting, Project, SetBindingRequest};
use alm_binding::services::BindingService;
use alm_binding::store::MemoryStore;

pub const PROJECT_ADMIN: &str = "admin";
pub const SYSTEM_ADMIN: &str = "sysadmin";
pub const PLAIN_USER: &str = "user";

/// Two projects administered by `admin`, two GitHub settings, and a
/// system administrator.
pub struct Fixture {
    pub store: MemoryStore,
    pub service: BindingService,
    pub p1: Project,
    pub p2: Project,
    pub gh1: AlmSetting,
    pub gh2: AlmSetting,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        let p1 = store.insert_project("P1", "Project 1").await.unwrap();
        let p2 = store.insert_project("P2", "Project 2").await.unwrap();
        let gh1 = store
            .insert_alm_setting("gh-1", AlmProvider::Github, None)
            .await
            .unwrap();
        let gh2 = store
            .insert_alm_setting("gh-2", AlmProvider::Github, None)
            .await
            .unwrap();

        let permissions = StaticPermissions::new()
            .with_project_admin(PROJECT_ADMIN, p1.id)
            .with_project_admin(PROJECT_ADMIN, p2.id)
            .with_system_admin(SYSTEM_ADMIN);

        let service = BindingService::new(Arc::new(store.clone()), Arc::new(permissions));

        Self {
            store,
            service,
            p1,
            p2,
            gh1,
            gh2,
        }
    }
}

pub fn actor(login: &str) -> Actor {
    Actor::new(login)
}

pub fn set_request(project: &str, setting: &str, repository: &str, slug: Option<&str>) -> SetBindingRequest {
    SetBindingRequest {
        alm_setting: setting.to_string(),
        project: project.to_string(),
        repository: repository.to_string(),
        slug: slug.map(str::to_string),
    }
}

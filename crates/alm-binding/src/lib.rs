//! ALM Binding Service Library
//!
//! Manages the binding between a project and an ALM provider setting
//! (GitHub, GitLab, Bitbucket, Azure DevOps):
//!
//! - **Set binding**: bind a project to a setting, replacing any previous binding
//! - **Delete binding**: remove a project's binding (idempotent)
//! - **Count bindings**: number of projects bound to a setting
//! - **Get binding**: read a project's binding
//!
//! ## Architecture
//!
//! Handlers extract the [`auth::Actor`] and validate parameters, the
//! [`services::BindingService`] checks capabilities and referenced entities,
//! and the [`store::Store`] runs everything in one unit of work that is
//! committed once. PostgreSQL and in-memory stores are provided.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use alm_binding::{
//!     auth::PgPermissionChecker,
//!     config::{AppConfig, DatabaseConfig},
//!     db::create_pool,
//!     routes::build_router,
//!     services::BindingService,
//!     state::AppState,
//!     store::PgStore,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = create_pool(&DatabaseConfig::from_env()?).await?;
//!     let service = BindingService::new(
//!         Arc::new(PgStore::new(pool.clone())),
//!         Arc::new(PgPermissionChecker::new(pool.clone())),
//!     );
//!     let app = build_router(AppState::new(Some(pool), AppConfig::from_env()?), service);
//!     // ... serve app
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod result_ext;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod store;

pub use error::{AppError, AppResult};
pub use result_ext::ResultExt;

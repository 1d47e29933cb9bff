//! Project database model.
//!
//! Projects are owned by another part of the platform; this service only
//! resolves them by key.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A project that can be bound to an ALM setting.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Project {
    /// Internal identifier
    pub id: Uuid,

    /// Unique project key
    pub key: String,

    /// Display name
    #[sqlx(default)]
    #[serde(default)]
    pub name: String,
}

//! Actor identity and capability checks.
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! login in the [`ACTOR_HEADER`] header and this service only decides what
//! that actor may do.

mod extract;
mod permissions;
mod types;

pub use extract::ACTOR_HEADER;
pub use permissions::{PermissionChecker, PgPermissionChecker, StaticPermissions};
pub use types::Actor;

//! HTTP handlers for the ALM binding API.
//!
//! This module contains all route handlers organized by domain.

pub mod bindings;
pub mod health;
mod params;

pub use health::{api_health, health_check};
pub use params::{BodyParams, QueryParams};

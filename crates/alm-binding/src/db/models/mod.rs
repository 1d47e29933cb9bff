//! Database models for the ALM binding server.
//!
//! This module contains SQLx-compatible model definitions
//! for the binding tables and the read-only entities they reference.

pub mod alm_setting;
pub mod binding;
pub mod project;

pub use alm_setting::*;
pub use binding::*;
pub use project::*;

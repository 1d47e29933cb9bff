//! Database queries for the ALM binding server.
//!
//! Query functions take a connection rather than the pool so that a
//! service call can run all of them inside one transaction.

pub mod alm_setting;
pub mod binding;
pub mod permission;
pub mod project;

//! Service layer for the ALM binding server.
//!
//! Services encapsulate business logic and coordinate
//! between handlers and the binding store.

pub mod binding;

pub use binding::BindingService;

//! # regform-core
//!
//! Foundation types for the regform workspace. This crate has no internal
//! dependencies and provides the pieces every other crate builds on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`value`] - Normalized answer values produced by submission validation
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use error::{FormError, FormResult};
pub use value::Value;

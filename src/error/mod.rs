//! Error types for validation failures.
//!
//! This module provides the single per-call error record produced when a
//! validate call fails.

mod validation_error;

pub use validation_error::ValidationError;

//! Error helpers for the store
//!
//! The store reuses the core error facility; these helpers classify
//! driver failures.

use onceler_core::errors::{execution_error, OnceError};

pub use onceler_core::errors::Result;

/// Create an execution error from a rusqlite failure
pub fn from_rusqlite(op: &str, err: rusqlite::Error) -> OnceError {
    execution_error(op, err)
}

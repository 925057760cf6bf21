//! Error taxonomy for table operations

use std::collections::TryReserveError;
use thiserror::Error;

/// Failure reported by a table operation.
///
/// Nothing here is fatal: every variant is handed back to the caller, which
/// decides whether to retry or give up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("capacity must be greater than zero")]
    InvalidCapacity,

    #[error("allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("key not found: '{0}'")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, TableError>;

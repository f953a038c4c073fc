//! Error types for FDB
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::entry::EntryKind;

/// Result type alias using FdbError
pub type Result<T> = std::result::Result<T, FdbError>;

/// Unified error type for FDB operations
///
/// "Already exists" is deliberately absent: creating a bank or registry
/// that already exists is not a failure of intent, so creation returns
/// [`CreateOutcome`](crate::CreateOutcome) instead of an error.
#[derive(Debug, Error)]
pub enum FdbError {
    // -------------------------------------------------------------------------
    // Name / Path Errors
    // -------------------------------------------------------------------------
    #[error("invalid name {0:?}: names may not contain a path separator")]
    InvalidName(String),

    #[error("{} exists but is not a {expected}", path.display())]
    WrongType { path: PathBuf, expected: EntryKind },

    // -------------------------------------------------------------------------
    // Registry State Errors
    // -------------------------------------------------------------------------
    #[error("registry {} is not open", .0.display())]
    NotOpen(PathBuf),

    #[error("registry {} is already open", .0.display())]
    AlreadyOpen(PathBuf),

    #[error("buffer of {len} bytes is smaller than the mapped size {size}")]
    BufferTooSmall { len: usize, size: usize },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

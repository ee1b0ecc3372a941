//! Audit log errors.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors from reading or writing an audit log.
#[derive(Error, Debug)]
pub enum AuditError {
    /// Underlying file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The log file has not been created yet.
    #[error("log file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Sink refused the operation (simulated outage or poisoned lock).
    #[error("log unavailable: {0}")]
    Unavailable(String),
}

//! Guard construction errors.

use thiserror::Error;

/// Errors raised while building a [`crate::LoginGuard`].
///
/// Guard operations themselves never fail: audit write failures are queued
/// and surfaced through [`crate::LoginGuard::take_log_failures`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// Threshold must allow at least one attempt.
    #[error("max attempts must be at least 1, got {0}")]
    InvalidThreshold(u32),

    /// Warning level must be at least one failure.
    #[error("warning level must be at least 1, got {0}")]
    InvalidWarnLevel(u32),
}

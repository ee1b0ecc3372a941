//! Audit log abstraction.
//!
//! The guard writes one line per [`crate::SecurityEvent`]. The trait is
//! synchronous and line-oriented: each `append` must reach the sink before it
//! returns, with no buffering across events.

mod error;
mod file;
mod memory;

pub use error::AuditError;
pub use file::{DEFAULT_LOG_FILE, FileAuditLog};
pub use memory::MemoryAuditLog;

/// Append-only sink for timestamped audit lines.
///
/// Implementations never reorder lines. Callers treat `append` failures as
/// non-fatal: the event is lost, the failure is reported, and the operation
/// that produced it continues.
pub trait AuditLog {
    /// Append a single line. `line` carries no trailing newline.
    fn append(&mut self, line: &str) -> Result<(), AuditError>;

    /// Every line written so far, oldest first.
    ///
    /// Returns [`AuditError::NotFound`] if nothing was ever written to a
    /// durable sink.
    fn entries(&self) -> Result<Vec<String>, AuditError>;

    /// Human-readable location (file path, or a tag for in-memory sinks).
    fn location(&self) -> String;
}

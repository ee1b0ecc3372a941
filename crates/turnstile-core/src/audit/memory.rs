//! In-memory audit sink.

#![allow(clippy::disallowed_types, reason = "Synchronous in-memory operations only")]

use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicBool, Ordering},
};

use super::{AuditError, AuditLog};

/// In-memory audit log for testing and simulation.
///
/// Clones share the same line buffer, so a test can hand one clone to the
/// guard and inspect the other. [`MemoryAuditLog::set_failing`] makes every
/// append fail, which exercises the best-effort logging path.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditLog {
    lines: Arc<Mutex<Vec<String>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryAuditLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent appends fail (`true`) or succeed (`false`).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of all lines. Empty if the lock is poisoned.
    pub fn lines(&self) -> Vec<String> {
        self.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    /// Number of lines written.
    pub fn len(&self) -> usize {
        self.lock().map(|lines| lines.len()).unwrap_or_default()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<String>>, AuditError> {
        self.lines.lock().map_err(|_| AuditError::Unavailable("memory log lock poisoned".into()))
    }
}

impl AuditLog for MemoryAuditLog {
    fn append(&mut self, line: &str) -> Result<(), AuditError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AuditError::Unavailable("simulated write failure".into()));
        }
        self.lock()?.push(line.to_owned());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<String>, AuditError> {
        Ok(self.lock()?.clone())
    }

    fn location(&self) -> String {
        "<memory>".to_owned()
    }
}

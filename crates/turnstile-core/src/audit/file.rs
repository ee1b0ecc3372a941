//! File-backed audit log.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use super::{AuditError, AuditLog};

/// Default log file name used by the interactive shell.
pub const DEFAULT_LOG_FILE: &str = "security_log.txt";

/// Append-mode UTF-8 text log.
///
/// The file is opened per line in create+append mode, so every event is on
/// disk once `append` returns and concurrent readers always see whole lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAuditLog {
    path: PathBuf,
}

impl FileAuditLog {
    /// Log into `path`. The file is created on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileAuditLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

impl AuditLog for FileAuditLog {
    fn append(&mut self, line: &str) -> Result<(), AuditError> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut record = String::with_capacity(line.len() + 1);
        record.push_str(line);
        record.push('\n');
        file.write_all(record.as_bytes())?;
        Ok(())
    }

    fn entries(&self) -> Result<Vec<String>, AuditError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text.lines().map(str::to_owned).collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(AuditError::NotFound(self.path.clone()))
            },
            Err(e) => Err(AuditError::Io(e)),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

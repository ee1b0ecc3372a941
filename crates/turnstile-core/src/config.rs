//! Guard configuration loader (TOML).
//!
//! Every key is optional:
//!
//! ```toml
//! max_attempts = 5
//! warn_at = 3
//! log_file = "security_log.txt"
//!
//! [credentials]
//! admin = "password123"
//! ```
//!
//! A missing `[credentials]` table falls back to the demo accounts.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    audit::{DEFAULT_LOG_FILE, FileAuditLog},
    clock::Clock,
    credentials::{CredentialStore, DEMO_ACCOUNTS},
    guard::{DEFAULT_MAX_ATTEMPTS, DEFAULT_WARN_AT, LoginGuard},
};

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML syntax or type mismatch.
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Config file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Values parsed but are out of range.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Construction parameters for a file-logging [`LoginGuard`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    /// Consecutive failures before lockout.
    pub max_attempts: u32,
    /// Failure count flagged as near-threshold in reports.
    pub warn_at: u32,
    /// Audit log path.
    pub log_file: PathBuf,
    /// Username to plain-text secret.
    pub credentials: BTreeMap<String, String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            warn_at: DEFAULT_WARN_AT,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            credentials: DEMO_ACCOUNTS
                .iter()
                .map(|(u, s)| ((*u).to_owned(), (*s).to_owned()))
                .collect(),
        }
    }
}

impl GuardConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse and validate TOML text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::Validation("max_attempts must be at least 1".into()));
        }
        if self.warn_at == 0 {
            return Err(ConfigError::Validation("warn_at must be at least 1".into()));
        }
        if self.log_file.to_string_lossy().trim().is_empty() {
            return Err(ConfigError::Validation("log_file must not be blank".into()));
        }
        Ok(())
    }

    /// Build a guard that logs to [`GuardConfig::log_file`].
    pub fn build<C: Clock>(&self, clock: C) -> Result<LoginGuard<FileAuditLog, C>, ConfigError> {
        self.validate()?;
        let credentials = CredentialStore::from(self.credentials.clone());
        let guard = LoginGuard::new(
            self.max_attempts,
            credentials,
            FileAuditLog::new(&self.log_file),
            clock,
        )
        .and_then(|guard| guard.with_warn_at(self.warn_at))
        .map_err(|e| ConfigError::Validation(e.to_string()))?;
        Ok(guard)
    }
}

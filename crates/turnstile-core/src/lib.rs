//! Core login guard for Turnstile.
//!
//! A single-process login simulator: credentials are checked against a fixed
//! in-memory table, consecutive failures are counted per username, and a
//! username is locked out once its counter reaches the threshold. Lockouts are
//! permanent until an operator lifts them. Every event is appended to a
//! timestamped audit log.
//!
//! # Components
//!
//! - [`LoginGuard`]: the lockout state machine
//! - [`CredentialStore`]: read-only username/secret table
//! - [`AuditLog`]: append-only sink ([`FileAuditLog`], [`MemoryAuditLog`])
//! - [`Clock`]: time source ([`SystemClock`], [`FixedClock`])
//! - [`SecurityEvent`]: the audit message catalogue
//! - [`GuardConfig`]: TOML configuration
//!
//! The guard does no I/O of its own beyond the audit sink, so the same code
//! runs in the terminal frontend, the demo, and deterministic simulation.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod audit;
pub mod clock;
mod config;
mod credentials;
mod error;
mod event;
mod guard;
mod status;
mod system_clock;

pub use audit::{AuditError, AuditLog, DEFAULT_LOG_FILE, FileAuditLog, MemoryAuditLog};
pub use clock::{Clock, FixedClock, TIMESTAMP_FORMAT, format_timestamp};
pub use config::{ConfigError, GuardConfig};
pub use credentials::{CredentialStore, DEMO_ACCOUNTS};
pub use error::GuardError;
pub use event::SecurityEvent;
pub use guard::{AuthOutcome, DEFAULT_MAX_ATTEMPTS, DEFAULT_WARN_AT, LoginGuard};
pub use status::{BlockedUser, PendingUser, SecurityStatus, SystemInfo};
pub use system_clock::SystemClock;

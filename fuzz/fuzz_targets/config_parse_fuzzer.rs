//! Fuzz target for configuration parsing
//!
//! # Invariants
//!
//! - Parsing arbitrary text returns a value or an error, never panics
//! - An accepted config has a positive threshold and warning level
//! - Every accepted config builds a guard against an in-memory log

#![no_main]

use libfuzzer_sys::fuzz_target;
use turnstile_core::{CredentialStore, GuardConfig, LoginGuard, MemoryAuditLog};
use turnstile_harness::SimClock;

fuzz_target!(|text: &str| {
    let Ok(config) = GuardConfig::parse(text) else {
        return;
    };
    assert!(config.max_attempts > 0);
    assert!(config.warn_at > 0);

    let credentials = CredentialStore::from(config.credentials.clone());
    let log = MemoryAuditLog::new();
    let guard = LoginGuard::new(config.max_attempts, credentials, log, SimClock::epoch())
        .and_then(|g| g.with_warn_at(config.warn_at));
    assert!(guard.is_ok());
});

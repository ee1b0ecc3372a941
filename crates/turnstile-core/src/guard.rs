//! Login guard state machine.
//!
//! Per-username lifecycle:
//!
//! ```text
//! CLEAN --fail--> COUNTING(n) --fail, n == max--> BLOCKED --unblock--> CLEAN
//!                 COUNTING(n) --success---------> CLEAN
//! ```
//!
//! BLOCKED never expires on its own. A blocked username is rejected before its
//! credentials are looked at, and its counter is retained so reports show the
//! count that triggered the lockout.
//!
//! Every transition is written to the audit log. Logging is best effort: a
//! failed write is traced, queued for the operator and otherwise ignored.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    audit::{AuditError, AuditLog},
    clock::Clock,
    credentials::CredentialStore,
    error::GuardError,
    event::SecurityEvent,
    status::{BlockedUser, PendingUser, SecurityStatus, SystemInfo},
};

/// Default number of consecutive failures that triggers a lockout.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default failure count at which a pending user is flagged in reports.
///
/// Fixed rather than derived from the threshold.
pub const DEFAULT_WARN_AT: u32 = 3;

/// Result of one [`LoginGuard::authenticate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Credentials matched; any failure counter was cleared.
    Granted,

    /// Credentials did not match and the threshold was not reached.
    Denied {
        /// Consecutive failures including this one.
        attempts: u32,
        /// Failures left before lockout.
        remaining: u32,
    },

    /// Credentials did not match and this failure locked the user out.
    LockedOut {
        /// Consecutive failures including this one.
        attempts: u32,
    },

    /// User was already locked out; credentials were not checked.
    Blocked,
}

impl AuthOutcome {
    /// Whether access was granted.
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Credential verification, failure counting and lockout.
///
/// Owns its state explicitly; create one per process and pass it by
/// reference. All mutation goes through `&mut self`, so a single caller at a
/// time is enforced by the borrow checker.
///
/// Generic over the audit sink `L` and clock `C` so tests can observe the log
/// and pin time.
#[derive(Debug)]
pub struct LoginGuard<L: AuditLog, C: Clock> {
    /// Failures allowed before lockout.
    max_attempts: u32,
    /// Failure count flagged as near-threshold in reports.
    warn_at: u32,
    /// Read-only credential table.
    credentials: CredentialStore,
    /// Consecutive failures per username. Absent means zero.
    failed_attempts: BTreeMap<String, u32>,
    /// Locked-out usernames.
    blocked: BTreeSet<String>,
    /// Audit sink.
    log: L,
    /// Timestamp source.
    clock: C,
    /// Write failures not yet surfaced to the operator.
    log_failures: Vec<AuditError>,
}

impl<L: AuditLog, C: Clock> LoginGuard<L, C> {
    /// Create a guard with the default warning level.
    pub fn new(
        max_attempts: u32,
        credentials: CredentialStore,
        log: L,
        clock: C,
    ) -> Result<Self, GuardError> {
        if max_attempts == 0 {
            return Err(GuardError::InvalidThreshold(max_attempts));
        }

        Ok(Self {
            max_attempts,
            warn_at: DEFAULT_WARN_AT,
            credentials,
            failed_attempts: BTreeMap::new(),
            blocked: BTreeSet::new(),
            log,
            clock,
            log_failures: Vec::new(),
        })
    }

    /// Replace the near-threshold warning level used by [`Self::status`].
    pub fn with_warn_at(mut self, warn_at: u32) -> Result<Self, GuardError> {
        if warn_at == 0 {
            return Err(GuardError::InvalidWarnLevel(warn_at));
        }
        self.warn_at = warn_at;
        Ok(self)
    }

    /// Check credentials and update failure/lockout state.
    ///
    /// Unknown usernames take the same path as wrong secrets, so neither the
    /// outcome nor the log reveals which accounts exist.
    pub fn authenticate(&mut self, username: &str, secret: &str) -> AuthOutcome {
        if self.is_blocked(username) {
            tracing::warn!(username, "login attempt while blocked");
            self.log_event(&SecurityEvent::BlockedAttempt { username: username.to_owned() });
            return AuthOutcome::Blocked;
        }

        if self.credentials.verify(username, secret) {
            self.failed_attempts.remove(username);
            tracing::info!(username, "login succeeded");
            self.log_event(&SecurityEvent::LoginSucceeded { username: username.to_owned() });
            return AuthOutcome::Granted;
        }

        self.record_failed_attempt(username)
    }

    /// Count a failure and lock the user out once the threshold is reached.
    fn record_failed_attempt(&mut self, username: &str) -> AuthOutcome {
        let attempts = match self.failed_attempts.get_mut(username) {
            Some(count) => {
                *count += 1;
                *count
            },
            None => {
                self.failed_attempts.insert(username.to_owned(), 1);
                1
            },
        };

        tracing::warn!(username, attempts, max = self.max_attempts, "login failed");
        self.log_event(&SecurityEvent::LoginFailed {
            username: username.to_owned(),
            attempt: attempts,
            max: self.max_attempts,
        });

        if attempts >= self.max_attempts {
            self.block_user(username);
            AuthOutcome::LockedOut { attempts }
        } else {
            AuthOutcome::Denied { attempts, remaining: self.max_attempts - attempts }
        }
    }

    /// Add `username` to the blocked set. The counter is left in place.
    fn block_user(&mut self, username: &str) {
        self.blocked.insert(username.to_owned());
        tracing::warn!(username, max = self.max_attempts, "user blocked");
        self.log_event(&SecurityEvent::UserBlocked {
            username: username.to_owned(),
            max: self.max_attempts,
        });
    }

    /// Lift a lockout and forget the user's failure counter.
    ///
    /// Returns `false` without touching state or the log if `username` is not
    /// blocked.
    pub fn unblock(&mut self, username: &str) -> bool {
        if !self.blocked.remove(username) {
            return false;
        }

        self.failed_attempts.remove(username);
        tracing::info!(username, "user unblocked");
        self.log_event(&SecurityEvent::UserUnblocked { username: username.to_owned() });
        true
    }

    /// Write `[YYYY-MM-DD HH:MM:SS] <event>` to the audit log.
    ///
    /// Never fails. A write error is traced and queued for
    /// [`Self::take_log_failures`].
    pub fn log_event(&mut self, event: &SecurityEvent) {
        let line = format!("[{}] {event}", self.clock.timestamp());
        if let Err(e) = self.log.append(&line) {
            tracing::error!(error = %e, location = %self.log.location(), "failed to write to log");
            self.log_failures.push(e);
        }
    }

    /// Snapshot of the blocked set and pending counters.
    pub fn status(&self) -> SecurityStatus {
        let pending = self
            .failed_attempts
            .iter()
            .filter(|(username, _)| !self.blocked.contains(*username))
            .map(|(username, &failed_attempts)| PendingUser {
                username: username.clone(),
                failed_attempts,
                near_threshold: failed_attempts >= self.warn_at,
            })
            .collect();

        SecurityStatus {
            generated_at: self.clock.now(),
            max_attempts: self.max_attempts,
            blocked: self.blocked_with_attempts(),
            pending,
        }
    }

    /// Blocked usernames, sorted and without duplicates.
    pub fn blocked_users(&self) -> Vec<String> {
        self.blocked.iter().cloned().collect()
    }

    /// Blocked users with their retained counters, sorted by username.
    pub fn blocked_with_attempts(&self) -> Vec<BlockedUser> {
        self.blocked
            .iter()
            .map(|username| BlockedUser {
                username: username.clone(),
                failed_attempts: self.failed_attempts.get(username).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Whether `username` is locked out.
    pub fn is_blocked(&self, username: &str) -> bool {
        self.blocked.contains(username)
    }

    /// Failure counter for `username`. `None` if there is none.
    pub fn failed_attempts(&self, username: &str) -> Option<u32> {
        self.failed_attempts.get(username).copied()
    }

    /// Current time from the guard's clock, as written in audit lines.
    pub fn timestamp(&self) -> String {
        self.clock.timestamp()
    }

    /// Configured threshold.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Configured near-threshold warning level.
    pub fn warn_at(&self) -> u32 {
        self.warn_at
    }

    /// Credential table.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Configuration and counter sizes for the system information screen.
    pub fn system_info(&self) -> SystemInfo {
        SystemInfo {
            max_attempts: self.max_attempts,
            log_location: self.log.location(),
            registered_users: self.credentials.len(),
            blocked_users: self.blocked.len(),
            active_failed_attempts: self.failed_attempts.len(),
        }
    }

    /// Read the audit log back, oldest line first.
    pub fn log_entries(&self) -> Result<Vec<String>, AuditError> {
        self.log.entries()
    }

    /// Drain audit write failures queued since the last call.
    pub fn take_log_failures(&mut self) -> Vec<AuditError> {
        std::mem::take(&mut self.log_failures)
    }

    /// Audit sink.
    pub fn audit_log(&self) -> &L {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::{audit::MemoryAuditLog, clock::FixedClock};

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .and_then(|d| d.and_hms_opt(10, 11, 12))
            .expect("valid date")
    }

    fn guard(max: u32) -> (LoginGuard<MemoryAuditLog, FixedClock>, MemoryAuditLog) {
        let log = MemoryAuditLog::new();
        let guard =
            LoginGuard::new(max, CredentialStore::demo(), log.clone(), FixedClock::new(at()))
                .expect("valid threshold");
        (guard, log)
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let result = LoginGuard::new(
            0,
            CredentialStore::demo(),
            MemoryAuditLog::new(),
            FixedClock::new(at()),
        );
        assert!(matches!(result, Err(GuardError::InvalidThreshold(0))));
    }

    #[test]
    fn zero_warn_level_is_rejected() {
        let (guard, _) = guard(5);
        assert!(matches!(guard.with_warn_at(0), Err(GuardError::InvalidWarnLevel(0))));
    }

    #[test]
    fn successful_login_on_clean_state() {
        let (mut guard, log) = guard(5);

        assert_eq!(guard.authenticate("admin", "password123"), AuthOutcome::Granted);
        assert_eq!(guard.failed_attempts("admin"), None);
        assert_eq!(log.lines(), ["[2024-05-06 10:11:12] Successful login for user 'admin'"]);
    }

    #[test]
    fn single_failure_counts_without_blocking() {
        let (mut guard, log) = guard(5);

        let outcome = guard.authenticate("admin", "wrongpassword");

        assert_eq!(outcome, AuthOutcome::Denied { attempts: 1, remaining: 4 });
        assert!(!outcome.is_granted());
        assert_eq!(guard.failed_attempts("admin"), Some(1));
        assert!(!guard.is_blocked("admin"));
        assert!(log.contains("Failed login attempt for 'admin' (Attempt 1/5)"));
    }

    #[test]
    fn threshold_failures_block_even_correct_credentials() {
        let (mut guard, log) = guard(5);

        for i in 1..=4 {
            let outcome = guard.authenticate("test", &format!("wrongpass{i}"));
            assert_eq!(outcome, AuthOutcome::Denied { attempts: i, remaining: 5 - i });
        }
        assert_eq!(guard.authenticate("test", "wrongpass5"), AuthOutcome::LockedOut {
            attempts: 5
        });

        assert_eq!(guard.blocked_users(), ["test"]);
        assert_eq!(guard.failed_attempts("test"), Some(5));
        assert!(log.contains("SECURITY ALERT - User 'test' blocked after 5 failed attempts"));

        assert_eq!(guard.authenticate("test", "test123"), AuthOutcome::Blocked);
        assert_eq!(guard.failed_attempts("test"), Some(5));
        assert!(log.contains("Blocked user 'test' attempted login"));
    }

    #[test]
    fn unknown_user_follows_failure_path() {
        let (mut guard, _) = guard(2);

        assert_eq!(guard.authenticate("ghost", "x"), AuthOutcome::Denied {
            attempts: 1,
            remaining: 1
        });
        assert_eq!(guard.authenticate("ghost", "y"), AuthOutcome::LockedOut { attempts: 2 });
        assert!(guard.is_blocked("ghost"));
    }

    #[test]
    fn success_resets_counter() {
        let (mut guard, _) = guard(5);

        guard.authenticate("user", "nope");
        guard.authenticate("user", "nope");
        assert_eq!(guard.authenticate("user", "userpass"), AuthOutcome::Granted);
        assert_eq!(guard.failed_attempts("user"), None);

        assert_eq!(guard.authenticate("user", "nope"), AuthOutcome::Denied {
            attempts: 1,
            remaining: 4
        });
    }

    #[test]
    fn unblock_clears_block_and_counter() {
        let (mut guard, log) = guard(1);
        guard.authenticate("admin", "bad");
        assert!(guard.is_blocked("admin"));

        assert!(guard.unblock("admin"));
        assert!(guard.blocked_users().is_empty());
        assert_eq!(guard.failed_attempts("admin"), None);
        assert!(log.contains("User 'admin' was unblocked"));

        assert_eq!(guard.authenticate("admin", "password123"), AuthOutcome::Granted);
    }

    #[test]
    fn unblock_of_unblocked_user_is_silent_noop() {
        let (mut guard, log) = guard(5);
        guard.authenticate("admin", "bad");
        let lines_before = log.len();

        assert!(!guard.unblock("admin"));
        assert!(!guard.unblock("nobody"));
        assert_eq!(guard.failed_attempts("admin"), Some(1));
        assert_eq!(log.len(), lines_before);
    }

    #[test]
    fn status_splits_blocked_and_pending() {
        let (mut guard, _) = guard(3);
        guard.authenticate("zoe", "x");
        for _ in 0..3 {
            guard.authenticate("mallory", "x");
        }
        guard.authenticate("amy", "x");
        guard.authenticate("amy", "x");

        let status = guard.status();

        assert_eq!(status.generated_at, at());
        assert_eq!(status.max_attempts, 3);
        assert_eq!(status.blocked, vec![BlockedUser {
            username: "mallory".into(),
            failed_attempts: 3
        }]);
        let pending: Vec<_> =
            status.pending.iter().map(|p| (p.username.as_str(), p.failed_attempts)).collect();
        assert_eq!(pending, [("amy", 2), ("zoe", 1)]);
    }

    #[test]
    fn near_threshold_flag_uses_fixed_warning_level() {
        let (mut guard, _) = guard(10);
        for _ in 0..3 {
            guard.authenticate("admin", "x");
        }
        guard.authenticate("user", "x");
        guard.authenticate("user", "x");

        let status = guard.status();
        let flags: Vec<_> = status.pending.iter().map(|p| p.near_threshold).collect();
        assert_eq!(flags, [true, false]);
    }

    #[test]
    fn custom_warning_level_applies() {
        let (guard, _) = guard(10);
        let mut guard = guard.with_warn_at(1).expect("valid warn level");
        guard.authenticate("admin", "x");

        assert!(guard.status().pending.iter().all(|p| p.near_threshold));
    }

    #[test]
    fn log_failures_are_queued_and_operations_continue() {
        let (mut guard, log) = guard(5);
        log.set_failing(true);

        assert_eq!(guard.authenticate("admin", "password123"), AuthOutcome::Granted);
        guard.authenticate("admin", "bad");

        let failures = guard.take_log_failures();
        assert_eq!(failures.len(), 2);
        assert!(guard.take_log_failures().is_empty());
        assert_eq!(guard.failed_attempts("admin"), Some(1));
    }

    #[test]
    fn system_info_reports_sizes() {
        let (mut guard, _) = guard(1);
        guard.authenticate("a", "x");
        guard.authenticate("b", "x");
        guard.unblock("b");

        let info = guard.system_info();
        assert_eq!(info.max_attempts, 1);
        assert_eq!(info.registered_users, 3);
        assert_eq!(info.blocked_users, 1);
        assert_eq!(info.active_failed_attempts, 1);
        assert_eq!(info.log_location, "<memory>");
    }
}

//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use super::{Invariant, InvariantResult, SystemSnapshot, Violation};

/// Every blocked user's retained counter equals the threshold.
///
/// Counters only grow while a user is unblocked, and the lockout fires on the
/// failure that reaches the threshold.
pub struct BlockedAtThreshold;

impl Invariant for BlockedAtThreshold {
    fn name(&self) -> &'static str {
        "blocked_at_threshold"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(guard) = &state.guard else {
            return Ok(());
        };

        for user in &guard.blocked {
            if user.failed_attempts != guard.max_attempts {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "'{}' blocked with {} failures, threshold is {}",
                        user.username, user.failed_attempts, guard.max_attempts
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Pending counters lie in `1..max_attempts` and never name a blocked user.
pub struct PendingBelowThreshold;

impl Invariant for PendingBelowThreshold {
    fn name(&self) -> &'static str {
        "pending_below_threshold"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(guard) = &state.guard else {
            return Ok(());
        };

        for user in &guard.pending {
            if user.failed_attempts == 0 || user.failed_attempts >= guard.max_attempts {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "'{}' pending with {} failures, threshold is {}",
                        user.username, user.failed_attempts, guard.max_attempts
                    ),
                });
            }
            if guard.blocked_users.binary_search(&user.username).is_ok() {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("'{}' is both pending and blocked", user.username),
                });
            }
        }
        Ok(())
    }
}

/// Blocked list is sorted, duplicate-free and agrees with the status report.
pub struct StatusPartition;

impl Invariant for StatusPartition {
    fn name(&self) -> &'static str {
        "status_partition"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(guard) = &state.guard else {
            return Ok(());
        };

        if !guard.blocked_users.windows(2).all(|w| w[0] < w[1]) {
            return Err(Violation {
                invariant: self.name(),
                message: format!("blocked list not strictly sorted: {:?}", guard.blocked_users),
            });
        }
        if !guard.pending.windows(2).all(|w| w[0].username < w[1].username) {
            return Err(Violation {
                invariant: self.name(),
                message: "pending section not strictly sorted".to_string(),
            });
        }

        let reported: Vec<&str> = guard.blocked.iter().map(|b| b.username.as_str()).collect();
        if reported != guard.blocked_users {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "status lists {reported:?} as blocked, guard has {:?}",
                    guard.blocked_users
                ),
            });
        }
        Ok(())
    }
}

/// The near-threshold flag is set exactly when the counter reaches `warn_at`.
pub struct NearThresholdFlag;

impl Invariant for NearThresholdFlag {
    fn name(&self) -> &'static str {
        "near_threshold_flag"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(guard) = &state.guard else {
            return Ok(());
        };

        for user in &guard.pending {
            if user.near_threshold != (user.failed_attempts >= guard.warn_at) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "'{}' at {} failures flagged {}, warn level is {}",
                        user.username, user.failed_attempts, user.near_threshold, guard.warn_at
                    ),
                });
            }
        }
        Ok(())
    }
}

/// The console's view of the session is self-consistent.
///
/// - A user is logged in exactly when the console is off the login flow.
/// - Input is masked exactly on the password prompt.
/// - The cursor never passes the end of the input.
/// - A logged-in user is never blocked.
pub struct SessionConsistency;

impl Invariant for SessionConsistency {
    fn name(&self) -> &'static str {
        "session_consistency"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(session) = &state.session else {
            return Ok(());
        };

        let violation = |message: String| Err(Violation { invariant: self.name(), message });

        if session.user.is_some() == session.on_login_flow() {
            return violation(format!(
                "user {:?} on screen {:?}",
                session.user, session.screen
            ));
        }
        if session.input_masked != session.on_password_prompt() {
            return violation(format!(
                "masked={} on screen {:?}",
                session.input_masked, session.screen
            ));
        }
        if session.cursor > session.input_len {
            return violation(format!(
                "cursor {} past input length {}",
                session.cursor, session.input_len
            ));
        }
        if let (Some(user), Some(guard)) = (&session.user, &state.guard)
            && guard.blocked_users.contains(user)
        {
            return violation(format!("blocked user '{user}' is logged in"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use turnstile_core::{BlockedUser, PendingUser};

    use super::*;
    use crate::invariants::GuardSnapshot;

    fn guard_state() -> GuardSnapshot {
        GuardSnapshot {
            max_attempts: 3,
            warn_at: 2,
            blocked_users: vec!["bob".into()],
            blocked: vec![BlockedUser { username: "bob".into(), failed_attempts: 3 }],
            pending: vec![
                PendingUser { username: "alice".into(), failed_attempts: 1, near_threshold: false },
                PendingUser { username: "carol".into(), failed_attempts: 2, near_threshold: true },
            ],
        }
    }

    fn snapshot(guard: GuardSnapshot) -> SystemSnapshot {
        SystemSnapshot { guard: Some(guard), session: None }
    }

    #[test]
    fn consistent_guard_passes() {
        let state = snapshot(guard_state());
        assert!(BlockedAtThreshold.check(&state).is_ok());
        assert!(PendingBelowThreshold.check(&state).is_ok());
        assert!(StatusPartition.check(&state).is_ok());
        assert!(NearThresholdFlag.check(&state).is_ok());
    }

    #[test]
    fn blocked_below_threshold_is_caught() {
        let mut guard = guard_state();
        guard.blocked[0].failed_attempts = 2;

        let err = BlockedAtThreshold.check(&snapshot(guard)).unwrap_err();
        assert_eq!(err.invariant, "blocked_at_threshold");
    }

    #[test]
    fn pending_blocked_overlap_is_caught() {
        let mut guard = guard_state();
        guard.pending[0].username = "bob".into();

        assert!(PendingBelowThreshold.check(&snapshot(guard)).is_err());
    }

    #[test]
    fn unsorted_blocked_list_is_caught() {
        let mut guard = guard_state();
        guard.blocked_users = vec!["zed".into(), "bob".into()];

        assert!(StatusPartition.check(&snapshot(guard)).is_err());
    }

    #[test]
    fn wrong_flag_is_caught() {
        let mut guard = guard_state();
        guard.pending[1].near_threshold = false;

        assert!(NearThresholdFlag.check(&snapshot(guard)).is_err());
    }
}

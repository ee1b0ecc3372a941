//! Reference implementation of the lockout rules.

use std::collections::{BTreeMap, BTreeSet};

use turnstile_core::{AuthOutcome, SecurityEvent};

use super::{ModelUser, Operation};

/// Result of applying an [`Operation`] to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelOutcome {
    /// Authentication result.
    Auth(AuthOutcome),
    /// Whether an unblock changed anything.
    Unblocked(bool),
    /// Time moved; nothing else did.
    TimeAdvanced,
}

/// State both the model and the real guard expose.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservableState {
    /// Blocked usernames, sorted.
    pub blocked: Vec<String>,
    /// Failure counters by username, blocked users included.
    pub counters: BTreeMap<String, u32>,
}

/// Plain restatement of the lockout rules.
#[derive(Debug, Clone)]
pub struct ModelGuard {
    max_attempts: u32,
    counters: BTreeMap<ModelUser, u32>,
    blocked: BTreeSet<ModelUser>,
    audit: Vec<SecurityEvent>,
}

impl ModelGuard {
    /// Empty model with the given threshold.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            counters: BTreeMap::new(),
            blocked: BTreeSet::new(),
            audit: Vec::new(),
        }
    }

    /// Apply one operation.
    pub fn apply(&mut self, op: &Operation) -> ModelOutcome {
        match *op {
            Operation::Authenticate { user, secret } => {
                let correct = user.secret() == Some(secret.resolve(user));
                ModelOutcome::Auth(self.authenticate(user, correct))
            },
            Operation::Unblock { user } => ModelOutcome::Unblocked(self.unblock(user)),
            Operation::AdvanceTime { .. } => ModelOutcome::TimeAdvanced,
        }
    }

    fn authenticate(&mut self, user: ModelUser, correct: bool) -> AuthOutcome {
        let username = user.name().to_string();

        if self.blocked.contains(&user) {
            self.audit.push(SecurityEvent::BlockedAttempt { username });
            return AuthOutcome::Blocked;
        }

        if correct {
            self.counters.remove(&user);
            self.audit.push(SecurityEvent::LoginSucceeded { username });
            return AuthOutcome::Granted;
        }

        let count = self.counters.entry(user).or_insert(0);
        *count += 1;
        let attempts = *count;
        self.audit.push(SecurityEvent::LoginFailed {
            username: username.clone(),
            attempt: attempts,
            max: self.max_attempts,
        });

        if attempts == self.max_attempts {
            self.blocked.insert(user);
            self.audit.push(SecurityEvent::UserBlocked { username, max: self.max_attempts });
            AuthOutcome::LockedOut { attempts }
        } else {
            AuthOutcome::Denied { attempts, remaining: self.max_attempts - attempts }
        }
    }

    fn unblock(&mut self, user: ModelUser) -> bool {
        if !self.blocked.remove(&user) {
            return false;
        }
        self.counters.remove(&user);
        self.audit.push(SecurityEvent::UserUnblocked { username: user.name().to_string() });
        true
    }

    /// Whether `user` is blocked.
    pub fn is_blocked(&self, user: ModelUser) -> bool {
        self.blocked.contains(&user)
    }

    /// Audit events the real guard should have written, in order.
    pub fn audit(&self) -> &[SecurityEvent] {
        &self.audit
    }

    /// Observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        let mut blocked: Vec<String> = self.blocked.iter().map(|u| u.name().to_string()).collect();
        blocked.sort();
        let counters =
            self.counters.iter().map(|(u, &count)| (u.name().to_string(), count)).collect();
        ObservableState { blocked, counters }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SecretChoice;

    fn fail(user: ModelUser) -> Operation {
        Operation::Authenticate { user, secret: SecretChoice::Wrong }
    }

    #[test]
    fn threshold_failure_locks_out() {
        let mut model = ModelGuard::new(2);

        assert_eq!(
            model.apply(&fail(ModelUser::Admin)),
            ModelOutcome::Auth(AuthOutcome::Denied { attempts: 1, remaining: 1 })
        );
        assert_eq!(
            model.apply(&fail(ModelUser::Admin)),
            ModelOutcome::Auth(AuthOutcome::LockedOut { attempts: 2 })
        );
        assert!(model.is_blocked(ModelUser::Admin));
        assert_eq!(model.audit().len(), 3);
    }

    #[test]
    fn blocked_user_is_rejected_with_correct_secret() {
        let mut model = ModelGuard::new(1);
        model.apply(&fail(ModelUser::User));

        let outcome = model.apply(&Operation::Authenticate {
            user: ModelUser::User,
            secret: SecretChoice::Correct,
        });

        assert_eq!(outcome, ModelOutcome::Auth(AuthOutcome::Blocked));
    }

    #[test]
    fn unblock_clears_counter() {
        let mut model = ModelGuard::new(1);
        model.apply(&fail(ModelUser::Stranger));

        assert_eq!(
            model.apply(&Operation::Unblock { user: ModelUser::Stranger }),
            ModelOutcome::Unblocked(true)
        );
        assert_eq!(model.observable_state(), ObservableState::default());
        assert_eq!(
            model.apply(&Operation::Unblock { user: ModelUser::Stranger }),
            ModelOutcome::Unblocked(false)
        );
    }
}

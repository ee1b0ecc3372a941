//! Model-based property tests.
//!
//! These tests generate random operation sequences and verify that the real
//! guard behaves identically to the reference model.
//!
//! # Architecture
//!
//! ```text
//! proptest generates: Vec<Operation>
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!      ModelGuard     RealWorld       Compare
//!      (reference)   (LoginGuard)   outcomes, state,
//!                                    audit text
//! ```

use arbitrary::{Arbitrary, Unstructured};
use proptest::prelude::*;
use turnstile_core::{CredentialStore, LoginGuard, MemoryAuditLog};
use turnstile_harness::{
    InvariantRegistry, ModelGuard, ModelOutcome, ModelUser, ObservableState, Operation,
    SecretChoice, SimClock, SystemSnapshot,
};

/// Real guard wrapper that mirrors `ModelGuard`'s interface.
struct RealWorld {
    guard: LoginGuard<MemoryAuditLog, SimClock>,
    log: MemoryAuditLog,
    clock: SimClock,
}

impl RealWorld {
    fn new(max_attempts: u32) -> Self {
        let log = MemoryAuditLog::new();
        let clock = SimClock::epoch();
        let guard =
            LoginGuard::new(max_attempts, CredentialStore::demo(), log.clone(), clock.clone())
                .expect("threshold is positive");
        Self { guard, log, clock }
    }

    fn apply(&mut self, op: &Operation) -> ModelOutcome {
        match *op {
            Operation::Authenticate { user, secret } => {
                ModelOutcome::Auth(self.guard.authenticate(user.name(), secret.resolve(user)))
            },
            Operation::Unblock { user } => ModelOutcome::Unblocked(self.guard.unblock(user.name())),
            Operation::AdvanceTime { secs } => {
                self.clock.advance(u32::from(secs));
                ModelOutcome::TimeAdvanced
            },
        }
    }

    fn observable_state(&self) -> ObservableState {
        let counters = ModelUser::ALL
            .iter()
            .filter_map(|u| self.guard.failed_attempts(u.name()).map(|n| (u.name().to_string(), n)))
            .collect();
        ObservableState { blocked: self.guard.blocked_users(), counters }
    }

    /// Audit lines with the `[timestamp] ` prefix removed.
    fn audit_messages(&self) -> Vec<String> {
        self.log
            .lines()
            .iter()
            .map(|line| line.split_once("] ").map_or(line.clone(), |(_, msg)| msg.to_string()))
            .collect()
    }
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    let user = prop::sample::select(ModelUser::ALL.to_vec());
    let secret = prop::sample::select(vec![
        SecretChoice::Correct,
        SecretChoice::Borrowed,
        SecretChoice::Wrong,
        SecretChoice::Empty,
    ]);

    prop_oneof![
        6 => (user.clone(), secret)
            .prop_map(|(user, secret)| Operation::Authenticate { user, secret }),
        2 => user.prop_map(|user| Operation::Unblock { user }),
        1 => any::<u16>().prop_map(|secs| Operation::AdvanceTime { secs }),
    ]
}

fn run_and_compare(max_attempts: u32, ops: &[Operation]) -> Result<(), TestCaseError> {
    let registry = InvariantRegistry::standard();
    let mut model = ModelGuard::new(max_attempts);
    let mut real = RealWorld::new(max_attempts);

    for (i, op) in ops.iter().enumerate() {
        let expected = model.apply(op);
        let actual = real.apply(op);
        prop_assert_eq!(expected, actual, "outcome diverged at step {} ({:?})", i, op);
        prop_assert_eq!(model.observable_state(), real.observable_state(), "state at step {}", i);

        let snapshot = SystemSnapshot::from_guard(&real.guard);
        if let Err(violations) = registry.check_all(&snapshot) {
            return Err(TestCaseError::fail(format!("step {i}: {violations:?}")));
        }
    }

    let expected: Vec<String> = model.audit().iter().map(ToString::to_string).collect();
    prop_assert_eq!(expected, real.audit_messages());

    let lines = real.log.lines();
    prop_assert!(lines.windows(2).all(|w| w[0][..21] <= w[1][..21]), "timestamps went backwards");
    Ok(())
}

proptest! {
    #[test]
    fn prop_guard_matches_model(
        max_attempts in 1u32..6,
        ops in prop::collection::vec(operation_strategy(), 0..80),
    ) {
        run_and_compare(max_attempts, &ops)?;
    }

    #[test]
    fn prop_arbitrary_sequences_match_model(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut u = Unstructured::new(&bytes);
        let ops = Vec::<Operation>::arbitrary(&mut u).unwrap_or_default();
        run_and_compare(3, &ops)?;
    }

    #[test]
    fn prop_time_never_lifts_lockout(secs in prop::collection::vec(any::<u16>(), 1..20)) {
        let mut real = RealWorld::new(2);
        let fail = Operation::Authenticate { user: ModelUser::Test, secret: SecretChoice::Wrong };
        real.apply(&fail);
        real.apply(&fail);

        for s in secs {
            real.apply(&Operation::AdvanceTime { secs: s });
            prop_assert!(real.guard.is_blocked("test"));
        }
    }
}

#[test]
fn audit_lines_follow_simulated_time() {
    let mut real = RealWorld::new(5);

    real.apply(&Operation::Authenticate { user: ModelUser::Admin, secret: SecretChoice::Correct });
    real.apply(&Operation::AdvanceTime { secs: 90 });
    real.apply(&Operation::Authenticate { user: ModelUser::Admin, secret: SecretChoice::Wrong });

    assert_eq!(real.log.lines(), vec![
        "[2024-01-01 00:00:00] Successful login for user 'admin'".to_string(),
        "[2024-01-01 00:01:30] Failed login attempt for 'admin' (Attempt 1/5)".to_string(),
    ]);
}

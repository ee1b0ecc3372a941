//! Fuzz target for the lockout state machine
//!
//! # Strategy
//!
//! - Arbitrary threshold in 1..=8
//! - Arbitrary sequences of logins, unblocks and clock steps over a small
//!   username pool, so counters collide and lockouts fire often
//! - Each step is applied to the real guard and to the reference model
//!
//! # Invariants
//!
//! - Real outcome equals model outcome at every step
//! - Blocked list and counters equal the model's
//! - Standard guard invariants hold after every step
//! - Audit text equals the model's event sequence
//! - NEVER panic

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use turnstile_core::{CredentialStore, LoginGuard, MemoryAuditLog};
use turnstile_harness::{
    InvariantRegistry, ModelGuard, ModelOutcome, ModelUser, ObservableState, Operation, SimClock,
    SystemSnapshot,
};

#[derive(Debug, Arbitrary)]
struct Input {
    threshold: u8,
    ops: Vec<Operation>,
}

fuzz_target!(|input: Input| {
    let max_attempts = u32::from(input.threshold % 8) + 1;
    let clock = SimClock::epoch();
    let log = MemoryAuditLog::new();
    let mut guard =
        LoginGuard::new(max_attempts, CredentialStore::demo(), log.clone(), clock.clone())
            .expect("threshold is positive");
    let mut model = ModelGuard::new(max_attempts);
    let registry = InvariantRegistry::standard();

    for op in &input.ops {
        let expected = model.apply(op);
        let actual = match *op {
            Operation::Authenticate { user, secret } => {
                ModelOutcome::Auth(guard.authenticate(user.name(), secret.resolve(user)))
            },
            Operation::Unblock { user } => ModelOutcome::Unblocked(guard.unblock(user.name())),
            Operation::AdvanceTime { secs } => {
                clock.advance(u32::from(secs));
                ModelOutcome::TimeAdvanced
            },
        };
        assert_eq!(expected, actual, "outcome diverged on {op:?}");

        let counters = ModelUser::ALL
            .iter()
            .filter_map(|u| guard.failed_attempts(u.name()).map(|n| (u.name().to_string(), n)))
            .collect();
        let real = ObservableState { blocked: guard.blocked_users(), counters };
        assert_eq!(model.observable_state(), real);

        registry.assert_all(&SystemSnapshot::from_guard(&guard), "after fuzz step");
    }

    let expected: Vec<String> = model.audit().iter().map(ToString::to_string).collect();
    let actual: Vec<String> = log
        .lines()
        .into_iter()
        .map(|line| line.split_once("] ").map_or(line.clone(), |(_, msg)| msg.to_string()))
        .collect();
    assert_eq!(expected, actual);
});

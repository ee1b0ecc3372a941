//! Deterministic simulation harness for Turnstile.
//!
//! Scripted implementations of the [`turnstile_app::Driver`] and
//! [`turnstile_core::Clock`] traits, so the production runtime can be driven
//! keystroke by keystroke with time under test control.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation of the lockout
//! rules. Operations are applied to both the model and a real
//! [`turnstile_core::LoginGuard`], and their observable states are compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks properties that must hold after every step,
//! whatever sequence led there. Use [`InvariantRegistry::standard()`] for the
//! guard and session invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod model;
pub mod sim_clock;
pub mod sim_driver;

pub use invariants::{
    BlockedAtThreshold, GuardSnapshot, Invariant, InvariantRegistry, InvariantResult,
    NearThresholdFlag, PendingBelowThreshold, SessionConsistency, SessionSnapshot,
    StatusPartition, SystemSnapshot, Violation,
};
pub use model::{ModelGuard, ModelOutcome, ModelUser, ObservableState, Operation, SecretChoice};
pub use sim_clock::SimClock;
pub use sim_driver::{Frame, SimDriver, SimDriverError};

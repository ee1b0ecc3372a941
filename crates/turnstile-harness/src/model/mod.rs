//! Reference model for model-based testing.
//!
//! [`ModelGuard`] restates the lockout rules as plainly as possible. Tests
//! apply the same [`Operation`] sequence to the model and to a real
//! [`turnstile_core::LoginGuard`] and compare outcomes, observable state and
//! audit text.

mod guard;
mod operation;

pub use guard::{ModelGuard, ModelOutcome, ObservableState};
pub use operation::{ModelUser, Operation, SecretChoice};

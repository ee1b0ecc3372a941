//! Application layer for Turnstile
//!
//! Pure state machines and generic runtime for the login console, enabling
//! deterministic simulation testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`App`]: UI state machine (login form, dashboard menu, reports)
//! - [`GuardBridge`]: executes App actions against the login guard
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod driver;
mod event;
mod input;
mod runtime;
mod state;

pub use action::{AppAction, ShutdownReason};
pub use app::App;
pub use bridge::GuardBridge;
pub use driver::Driver;
pub use event::AppEvent;
pub use input::{KeyInput, LineEditor};
pub use runtime::Runtime;
pub use state::{LOG_VIEW_LIMIT, LogView, LoginStage, Notice, NoticeLevel, Screen};

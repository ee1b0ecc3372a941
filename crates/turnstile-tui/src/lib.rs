//! Terminal UI for Turnstile
//!
//! A thin shell over [`turnstile_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic
//! [`turnstile_app::Runtime`].
//!
//! This crate only handles terminal rendering, diagnostics setup for the
//! binaries, and the scripted [`demo`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod demo;
pub mod logging;
pub mod terminal;
pub mod ui;

pub use terminal::{TerminalDriver, TerminalError};
pub use turnstile_app::{App, AppAction, AppEvent, Driver, GuardBridge, KeyInput, Runtime};

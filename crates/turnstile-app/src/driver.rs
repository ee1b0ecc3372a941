//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the production terminal and in
/// simulation.
///
/// # Implementations
///
/// - **TUI**: crossterm key events, ratatui rendering
/// - **Simulation**: scripted events, recorded screens
pub trait Driver {
    /// Platform-specific error type.
    type Error: std::error::Error + 'static;

    /// Wait for the next input event.
    ///
    /// Returns `None` once input is closed for good; the runtime treats that
    /// as an interrupt.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>>;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Release terminal or simulation resources.
    fn stop(&mut self);
}

//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`turnstile_app::Runtime`] orchestration code runs in both production and
//! simulation. Input is a scripted queue; output is a list of recorded
//! [`Frame`]s.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use turnstile_app::{App, AppEvent, Driver, KeyInput, Notice, Screen};

use crate::invariants::{InvariantRegistry, SystemSnapshot};

/// Error type for simulation driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// What the console showed at one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Screen on display.
    pub screen: Screen,
    /// Logged-in user.
    pub user: Option<String>,
    /// Status-line notice.
    pub notice: Option<Notice>,
    /// Error banner.
    pub alert: Option<String>,
    /// Input line as shown, masked on the password prompt.
    pub input: String,
}

impl Frame {
    fn capture(app: &App) -> Self {
        let buffer = app.editor().buffer();
        let input = if app.input_masked() {
            "*".repeat(buffer.chars().count())
        } else {
            buffer.to_string()
        };

        Self {
            screen: app.screen().clone(),
            user: app.user().map(str::to_owned),
            notice: app.notice().cloned(),
            alert: app.alert().map(str::to_owned),
            input,
        }
    }
}

/// Shared state for event injection.
///
/// This allows injection from outside async contexts.
#[derive(Debug, Default)]
struct SharedState {
    pending_events: VecDeque<AppEvent>,
    frames: Vec<Frame>,
    stopped: bool,
}

/// Simulation driver for deterministic testing.
///
/// Once the scripted queue runs dry, [`Driver::poll_event`] reports closed
/// input, which the runtime treats as an interrupt.
#[derive(Debug)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    invariants: Option<InvariantRegistry>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Create a new simulation driver.
    pub fn new() -> Self {
        Self { state: Arc::new(Mutex::new(SharedState::default())), invariants: None }
    }

    /// Check session invariants on every render.
    ///
    /// A violation fails the render, which ends the run with an error.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inject an `AppEvent` for processing.
    pub fn inject_event(&self, event: AppEvent) {
        self.lock().pending_events.push_back(event);
    }

    /// Inject one key press.
    pub fn inject_key(&self, key: KeyInput) {
        self.inject_event(AppEvent::Key(key));
    }

    /// Type `text` without submitting it.
    pub fn inject_text(&self, text: &str) {
        let mut state = self.lock();
        state.pending_events.extend(text.chars().map(|c| AppEvent::Key(KeyInput::Char(c))));
    }

    /// Type `text` and press Enter.
    pub fn inject_line(&self, text: &str) {
        self.inject_text(text);
        self.inject_key(KeyInput::Enter);
    }

    /// Inject a tick event.
    pub fn inject_tick(&self) {
        self.inject_event(AppEvent::Tick);
    }

    /// Inject Ctrl-C.
    pub fn inject_interrupt(&self) {
        self.inject_key(KeyInput::Interrupt);
    }

    /// Check if there are pending events to process.
    pub fn has_pending(&self) -> bool {
        !self.lock().pending_events.is_empty()
    }

    /// Every frame rendered so far.
    pub fn frames(&self) -> Vec<Frame> {
        self.lock().frames.clone()
    }

    /// Most recent frame.
    pub fn last_frame(&self) -> Option<Frame> {
        self.lock().frames.last().cloned()
    }

    /// Number of renders.
    pub fn render_count(&self) -> usize {
        self.lock().frames.len()
    }

    /// Whether the runtime released the driver.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        Ok(self.lock().pending_events.pop_front())
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        if let Some(registry) = &self.invariants {
            let snapshot = SystemSnapshot::from_app(app);
            if let Err(violations) = registry.check_all(&snapshot) {
                let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
                tracing::error!(?messages, "invariant violated during render");
                return Err(SimDriverError(messages.join("; ")));
            }
        }

        self.lock().frames.push(Frame::capture(app));
        Ok(())
    }

    fn stop(&mut self) {
        self.lock().stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inject_line_queues_keys_and_enter() {
        let driver = SimDriver::new();
        driver.inject_line("ab");

        let state = driver.lock();
        assert_eq!(state.pending_events.len(), 3);
        assert!(matches!(state.pending_events.back(), Some(AppEvent::Key(KeyInput::Enter))));
    }

    #[tokio::test]
    async fn poll_event_drains_then_closes() {
        let mut driver = SimDriver::new();
        driver.inject_tick();

        assert!(matches!(driver.poll_event().await, Ok(Some(AppEvent::Tick))));
        assert!(matches!(driver.poll_event().await, Ok(None)));
        assert!(!driver.has_pending());
    }

    #[test]
    fn render_records_masked_input() {
        let mut driver = SimDriver::new();
        let mut app = App::default();
        for c in "admin".chars() {
            app.handle(AppEvent::Key(KeyInput::Char(c)));
        }
        app.handle(AppEvent::Key(KeyInput::Enter));
        for c in "secret".chars() {
            app.handle(AppEvent::Key(KeyInput::Char(c)));
        }

        driver.render(&app).expect("render");

        let frame = driver.last_frame().expect("frame");
        assert_eq!(frame.input, "******");
        assert_eq!(driver.render_count(), 1);
    }

    #[test]
    fn stop_is_recorded() {
        let mut driver = SimDriver::new();
        driver.stop();
        assert!(driver.is_stopped());
    }
}

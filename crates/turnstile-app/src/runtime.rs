//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`GuardBridge`]: login guard adapter
//! - [`Driver`]: Platform-specific I/O

use turnstile_core::{AuditLog, Clock};

use crate::{App, AppAction, AppEvent, Driver, GuardBridge, ShutdownReason};

/// Generic runtime that orchestrates App, GuardBridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `L`: Audit sink
/// - `C`: Clock
pub struct Runtime<D, L, C>
where
    D: Driver,
    L: AuditLog,
    C: Clock,
{
    driver: D,
    app: App,
    bridge: GuardBridge<L, C>,
}

impl<D, L, C> Runtime<D, L, C>
where
    D: Driver,
    L: AuditLog,
    C: Clock,
{
    /// Create a new runtime.
    pub fn new(driver: D, app: App, bridge: GuardBridge<L, C>) -> Self {
        Self { driver, app, bridge }
    }

    /// Run the main event loop until the App quits or input closes.
    ///
    /// Logs "System started" before the first render and the stop or
    /// interrupt entry on the way out, including when the driver fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(&mut self) -> Result<ShutdownReason, D::Error> {
        let events = self.bridge.start();
        for event in events {
            self.app.handle(event);
        }
        self.app.handle(self.bridge.clock_event());

        let result = self.event_loop().await;
        let reason = result.as_ref().map_or(ShutdownReason::Interrupted, |reason| *reason);

        for event in self.bridge.shutdown(reason) {
            self.app.handle(event);
        }
        self.driver.stop();
        result
    }

    async fn event_loop(&mut self) -> Result<ShutdownReason, D::Error> {
        self.driver.render(&self.app)?;

        loop {
            let Some(event) = self.driver.poll_event().await? else {
                tracing::info!("input closed");
                return Ok(ShutdownReason::Interrupted);
            };
            if let Some(reason) = self.process_event(event)? {
                return Ok(reason);
            }
        }
    }

    /// Feed one event through the App, executing resulting actions.
    ///
    /// The dashboard clock is refreshed first. Returns the shutdown reason if
    /// the App asked to quit.
    fn process_event(&mut self, event: AppEvent) -> Result<Option<ShutdownReason>, D::Error> {
        let mut pending_actions = self.app.handle(self.bridge.clock_event());
        pending_actions.extend(self.app.handle(event));

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit { reason } => return Ok(Some(reason)),

                    // Guard operations go through the bridge
                    AppAction::Authenticate { .. }
                    | AppAction::Unblock { .. }
                    | AppAction::ShowStatus
                    | AppAction::LoadLogs
                    | AppAction::LoadBlockedUsers
                    | AppAction::ShowSystemInfo
                    | AppAction::Logout { .. } => {
                        let events = self.bridge.process_app_action(action);
                        for event in events {
                            let new_actions = self.app.handle(event);
                            pending_actions.extend(new_actions);
                        }
                    },
                }
            }
        }
        Ok(None)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the bridge
    pub fn bridge(&self) -> &GuardBridge<L, C> {
        &self.bridge
    }

    /// Get a reference to the driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Split into parts
    pub fn into_parts(self) -> (D, App, GuardBridge<L, C>) {
        (self.driver, self.app, self.bridge)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, convert::Infallible};

    use chrono::NaiveDate;
    use turnstile_core::{CredentialStore, FixedClock, LoginGuard, MemoryAuditLog};

    use super::*;
    use crate::{KeyInput, Screen};

    struct ScriptDriver {
        events: VecDeque<AppEvent>,
        renders: usize,
        stopped: bool,
    }

    impl ScriptDriver {
        fn keys(text: &str) -> Self {
            let events = text
                .chars()
                .map(|c| match c {
                    '\n' => AppEvent::Key(KeyInput::Enter),
                    c => AppEvent::Key(KeyInput::Char(c)),
                })
                .collect();
            Self { events, renders: 0, stopped: false }
        }
    }

    impl Driver for ScriptDriver {
        type Error = Infallible;

        async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
            Ok(self.events.pop_front())
        }

        fn render(&mut self, _app: &App) -> Result<(), Self::Error> {
            self.renders += 1;
            Ok(())
        }

        fn stop(&mut self) {
            self.stopped = true;
        }
    }

    type ScriptRuntime = Runtime<ScriptDriver, MemoryAuditLog, FixedClock>;

    fn runtime(script: &str) -> (ScriptRuntime, MemoryAuditLog) {
        let log = MemoryAuditLog::new();
        let clock = FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 2, 3)
                .and_then(|d| d.and_hms_opt(4, 5, 6))
                .expect("valid date"),
        );
        let guard =
            LoginGuard::new(5, CredentialStore::demo(), log.clone(), clock).expect("threshold");
        let runtime =
            Runtime::new(ScriptDriver::keys(script), App::default(), GuardBridge::new(guard));
        (runtime, log)
    }

    #[tokio::test]
    async fn login_logout_decline_stops_normally() {
        let (mut runtime, log) = runtime("admin\npassword123\n5no\n");

        let reason = runtime.run().await.expect("infallible");

        assert_eq!(reason, ShutdownReason::Normal);
        assert_eq!(runtime.app().clock(), Some("2024-02-03 04:05:06"));
        assert!(runtime.driver().stopped);
        assert!(runtime.driver().renders > 0);
        let lines = log.lines();
        assert_eq!(lines, [
            "[2024-02-03 04:05:06] System started",
            "[2024-02-03 04:05:06] Successful login for user 'admin'",
            "[2024-02-03 04:05:06] User 'admin' logged out",
            "[2024-02-03 04:05:06] System stopped normally",
        ]);
    }

    #[tokio::test]
    async fn closed_input_is_an_interrupt() {
        let (mut runtime, log) = runtime("admin\nwrong\n");

        let reason = runtime.run().await.expect("infallible");

        assert_eq!(reason, ShutdownReason::Interrupted);
        assert_eq!(runtime.app().screen(), &Screen::Login(crate::LoginStage::Username));
        assert!(log.contains("Failed login attempt for 'admin' (Attempt 1/5)"));
        assert!(log.lines().last().is_some_and(|l| l.ends_with("System interrupted")));
    }
}

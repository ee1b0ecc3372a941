//! Guard-to-Application translation layer.
//!
//! The [`GuardBridge`] wraps the [`LoginGuard`] and adapts it to the
//! application lifecycle.
//!
//! # Responsibilities
//!
//! - Converts [`crate::AppAction`]s into guard calls.
//! - Converts guard results back into [`crate::AppEvent`]s.
//! - Writes the lifecycle entries (start, logout, stop) to the audit log.
//! - Surfaces audit write failures as [`AppEvent::Error`] after every call.

use turnstile_core::{AuditError, AuditLog, Clock, LoginGuard, SecurityEvent};

use crate::{AppAction, AppEvent, LogView, ShutdownReason};

/// Bridge between App and the login guard.
///
/// Generic over the audit sink and clock so the same bridge runs against a
/// log file in production and an in-memory log in simulation.
#[derive(Debug)]
pub struct GuardBridge<L: AuditLog, C: Clock> {
    guard: LoginGuard<L, C>,
}

impl<L: AuditLog, C: Clock> GuardBridge<L, C> {
    /// Wrap a guard.
    pub fn new(guard: LoginGuard<L, C>) -> Self {
        Self { guard }
    }

    /// Record system start.
    pub fn start(&mut self) -> Vec<AppEvent> {
        tracing::info!(max_attempts = self.guard.max_attempts(), "system started");
        self.guard.log_event(&SecurityEvent::SystemStarted);
        self.drain_log_failures(Vec::new())
    }

    /// Record system stop.
    pub fn shutdown(&mut self, reason: ShutdownReason) -> Vec<AppEvent> {
        let event = match reason {
            ShutdownReason::Normal => SecurityEvent::SystemStopped,
            ShutdownReason::Interrupted => SecurityEvent::SystemInterrupted,
        };
        tracing::info!(?reason, "system stopping");
        self.guard.log_event(&event);
        self.drain_log_failures(Vec::new())
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        let events = match action {
            AppAction::Authenticate { username, secret } => {
                let outcome = self.guard.authenticate(&username, &secret);
                vec![AppEvent::AuthCompleted { username, outcome }]
            },
            AppAction::Unblock { username } => {
                if self.guard.unblock(&username) {
                    vec![AppEvent::UserUnblocked { username }]
                } else {
                    vec![AppEvent::UnblockIgnored { username }]
                }
            },
            AppAction::ShowStatus => vec![AppEvent::StatusReady(self.guard.status())],
            AppAction::LoadLogs => match self.guard.log_entries() {
                Ok(lines) => vec![AppEvent::LogsLoaded(LogView::from_entries(lines))],
                Err(AuditError::NotFound(_)) => vec![AppEvent::LogsLoaded(LogView::Missing)],
                Err(e) => vec![AppEvent::Error { message: format!("Failed to read log: {e}") }],
            },
            AppAction::LoadBlockedUsers => {
                vec![AppEvent::BlockedListLoaded(self.guard.blocked_with_attempts())]
            },
            AppAction::ShowSystemInfo => vec![AppEvent::SystemInfoLoaded(self.guard.system_info())],
            AppAction::Logout { username } => {
                tracing::info!(%username, "user logged out");
                self.guard.log_event(&SecurityEvent::LoggedOut { username: username.clone() });
                vec![AppEvent::LoggedOut { username }]
            },
            AppAction::Render | AppAction::Quit { .. } => vec![],
        };

        self.drain_log_failures(events)
    }

    /// Current time from the guard's clock.
    pub fn clock_event(&self) -> AppEvent {
        AppEvent::ClockUpdated(self.guard.timestamp())
    }

    /// Guard state.
    pub fn guard(&self) -> &LoginGuard<L, C> {
        &self.guard
    }

    /// Mutable guard state.
    pub fn guard_mut(&mut self) -> &mut LoginGuard<L, C> {
        &mut self.guard
    }

    /// Unwrap the guard.
    pub fn into_guard(self) -> LoginGuard<L, C> {
        self.guard
    }

    fn drain_log_failures(&mut self, mut events: Vec<AppEvent>) -> Vec<AppEvent> {
        events.extend(
            self.guard
                .take_log_failures()
                .into_iter()
                .map(|e| AppEvent::Error { message: format!("Failed to write to log: {e}") }),
        );
        events
    }
}

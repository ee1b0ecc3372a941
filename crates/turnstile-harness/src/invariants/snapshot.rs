//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the system at a point in time.
//! Invariants operate on snapshots rather than live state so every check sees
//! the same consistent view.

use turnstile_app::{App, LoginStage, Screen};
use turnstile_core::{AuditLog, BlockedUser, Clock, LoginGuard, PendingUser};

/// Snapshot of the whole system.
///
/// Either half may be absent; invariants skip what they cannot see.
#[derive(Debug, Clone, Default)]
pub struct SystemSnapshot {
    /// Guard state, if captured.
    pub guard: Option<GuardSnapshot>,
    /// Console session state, if captured.
    pub session: Option<SessionSnapshot>,
}

impl SystemSnapshot {
    /// Create an empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot of the guard alone.
    pub fn from_guard<L: AuditLog, C: Clock>(guard: &LoginGuard<L, C>) -> Self {
        Self { guard: Some(GuardSnapshot::capture(guard)), session: None }
    }

    /// Snapshot of the console session alone.
    pub fn from_app(app: &App) -> Self {
        Self { guard: None, session: Some(SessionSnapshot::capture(app)) }
    }

    /// Snapshot of a session together with the guard behind it.
    pub fn capture<L: AuditLog, C: Clock>(app: &App, guard: &LoginGuard<L, C>) -> Self {
        Self {
            guard: Some(GuardSnapshot::capture(guard)),
            session: Some(SessionSnapshot::capture(app)),
        }
    }
}

/// Lockout state of a guard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardSnapshot {
    /// Configured threshold.
    pub max_attempts: u32,
    /// Near-threshold warning level.
    pub warn_at: u32,
    /// Blocked usernames as returned by `blocked_users`.
    pub blocked_users: Vec<String>,
    /// Blocked section of the status report.
    pub blocked: Vec<BlockedUser>,
    /// Pending section of the status report.
    pub pending: Vec<PendingUser>,
}

impl GuardSnapshot {
    /// Read the observable state of `guard`.
    pub fn capture<L: AuditLog, C: Clock>(guard: &LoginGuard<L, C>) -> Self {
        let status = guard.status();
        Self {
            max_attempts: guard.max_attempts(),
            warn_at: guard.warn_at(),
            blocked_users: guard.blocked_users(),
            blocked: status.blocked,
            pending: status.pending,
        }
    }
}

/// Console session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Current screen.
    pub screen: Screen,
    /// Logged-in user.
    pub user: Option<String>,
    /// Whether the input line is masked.
    pub input_masked: bool,
    /// Cursor position in characters.
    pub cursor: usize,
    /// Input length in characters.
    pub input_len: usize,
}

impl SessionSnapshot {
    /// Read the observable state of `app`.
    pub fn capture(app: &App) -> Self {
        Self {
            screen: app.screen().clone(),
            user: app.user().map(str::to_owned),
            input_masked: app.input_masked(),
            cursor: app.editor().cursor(),
            input_len: app.editor().len(),
        }
    }

    /// Whether the session is somewhere in the login flow.
    pub fn on_login_flow(&self) -> bool {
        matches!(self.screen, Screen::Login(_) | Screen::SwitchAccount)
    }

    /// Whether the session is waiting for a password.
    pub fn on_password_prompt(&self) -> bool {
        matches!(self.screen, Screen::Login(LoginStage::Password { .. }))
    }
}

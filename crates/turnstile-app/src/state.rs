//! Observable application state types.
//!
//! These structures are the view model: the subset of guard state the
//! frontends need to draw each screen, copied out of the guard so rendering
//! never borrows it.

use turnstile_core::{BlockedUser, SecurityStatus, SystemInfo};

/// Number of audit lines shown on the log screen.
pub const LOG_VIEW_LIMIT: usize = 30;

/// Which step of the login form has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStage {
    /// Waiting for a username.
    Username,
    /// Username accepted, waiting for the secret.
    Password {
        /// Username entered in the first step.
        username: String,
    },
}

/// Current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Login form.
    Login(LoginStage),
    /// Main menu after a successful login.
    Dashboard,
    /// Security status report.
    Status(SecurityStatus),
    /// Recent audit lines.
    Logs(LogView),
    /// Blocked users and an input for the one to unblock.
    Unblock(Vec<BlockedUser>),
    /// Configuration and counter sizes.
    SystemInfo(SystemInfo),
    /// "Login with different account?" prompt after logout.
    SwitchAccount,
}

/// Audit log as shown on the log screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogView {
    /// Nothing has been written to the log file yet.
    Missing,
    /// Tail of the log.
    Entries {
        /// Last [`LOG_VIEW_LIMIT`] lines, oldest first.
        recent: Vec<String>,
        /// Total number of lines in the log.
        total: usize,
    },
}

impl LogView {
    /// Keep the last [`LOG_VIEW_LIMIT`] lines of `lines`.
    pub fn from_entries(mut lines: Vec<String>) -> Self {
        let total = lines.len();
        let recent = lines.split_off(total.saturating_sub(LOG_VIEW_LIMIT));
        Self::Entries { recent, total }
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Neutral progress message.
    Info,
    /// Operation succeeded.
    Success,
    /// Operation succeeded but needs attention.
    Warning,
    /// Operation was refused.
    Error,
}

/// One-line feedback shown under the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity, used for styling.
    pub level: NoticeLevel,
    /// Message text.
    pub text: String,
}

impl Notice {
    /// Neutral notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, text: text.into() }
    }

    /// Success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, text: text.into() }
    }

    /// Warning notice.
    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, text: text.into() }
    }

    /// Error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }
}

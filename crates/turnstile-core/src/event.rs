//! Security event catalogue.
//!
//! Every line the guard writes to the audit log comes from a
//! [`SecurityEvent`]. The `Display` text is the external log format and must
//! stay byte-stable for anything that parses the log.

use std::fmt;

/// An auditable event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityEvent {
    /// The interactive shell started.
    SystemStarted,

    /// Credentials matched.
    LoginSucceeded {
        /// Account that logged in.
        username: String,
    },

    /// Credentials did not match (or the username is unknown).
    LoginFailed {
        /// Username as typed.
        username: String,
        /// Consecutive failures including this one.
        attempt: u32,
        /// Configured threshold.
        max: u32,
    },

    /// The failure counter reached the threshold.
    UserBlocked {
        /// Username that is now locked out.
        username: String,
        /// Configured threshold.
        max: u32,
    },

    /// A locked-out username tried to log in.
    BlockedAttempt {
        /// Username that is locked out.
        username: String,
    },

    /// An operator lifted a lockout.
    UserUnblocked {
        /// Username that was unblocked.
        username: String,
    },

    /// A session ended through the logout menu.
    LoggedOut {
        /// Account that logged out.
        username: String,
    },

    /// The shell exited through its normal path.
    SystemStopped,

    /// The shell was interrupted (Ctrl-C or closed input).
    SystemInterrupted,
}

impl fmt::Display for SecurityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SystemStarted => f.write_str("System started"),
            Self::LoginSucceeded { username } => {
                write!(f, "Successful login for user '{username}'")
            },
            Self::LoginFailed { username, attempt, max } => {
                write!(f, "Failed login attempt for '{username}' (Attempt {attempt}/{max})")
            },
            Self::UserBlocked { username, max } => {
                write!(f, "SECURITY ALERT - User '{username}' blocked after {max} failed attempts")
            },
            Self::BlockedAttempt { username } => {
                write!(f, "Blocked user '{username}' attempted login")
            },
            Self::UserUnblocked { username } => write!(f, "User '{username}' was unblocked"),
            Self::LoggedOut { username } => write!(f, "User '{username}' logged out"),
            Self::SystemStopped => f.write_str("System stopped normally"),
            Self::SystemInterrupted => f.write_str("System interrupted"),
        }
    }
}

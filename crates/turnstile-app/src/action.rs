//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// Operator declined another login or pressed Esc on the login screen.
    Normal,
    /// Ctrl-C or closed input.
    Interrupted,
}

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit {
        /// Recorded in the audit log on shutdown.
        reason: ShutdownReason,
    },

    /// Check credentials against the guard.
    Authenticate {
        /// Username as entered (trimmed).
        username: String,
        /// Secret as entered (trimmed).
        secret: String,
    },

    /// Lift a lockout.
    Unblock {
        /// Username to unblock.
        username: String,
    },

    /// Build a security status report.
    ShowStatus,

    /// Read the audit log back.
    LoadLogs,

    /// Fetch blocked users for the unblock screen.
    LoadBlockedUsers,

    /// Fetch configuration and counter sizes.
    ShowSystemInfo,

    /// End the current session.
    Logout {
        /// User being logged out.
        username: String,
    },
}

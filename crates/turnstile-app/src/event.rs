//! Application input events.
//!
//! This module defines [`AppEvent`], the comprehensive set of inputs that drive
//! the [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (Keyboard, Resize) and system ticks.
//! - Guard results translated by the [`crate::GuardBridge`].

use turnstile_core::{AuthOutcome, BlockedUser, SecurityStatus, SystemInfo};

use crate::{KeyInput, LogView};

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Current wall-clock time, already formatted.
    ClockUpdated(String),

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Guard answered an authentication request.
    AuthCompleted {
        /// Username that was checked.
        username: String,
        /// Guard verdict.
        outcome: AuthOutcome,
    },

    /// Security status report is ready.
    StatusReady(SecurityStatus),

    /// Audit log was read.
    LogsLoaded(LogView),

    /// Blocked users for the unblock screen, sorted by username.
    BlockedListLoaded(Vec<BlockedUser>),

    /// System information is ready.
    SystemInfoLoaded(SystemInfo),

    /// Lockout lifted.
    UserUnblocked {
        /// Username that was unblocked.
        username: String,
    },

    /// Unblock requested for a user that was not blocked.
    UnblockIgnored {
        /// Username from the request.
        username: String,
    },

    /// Session ended.
    LoggedOut {
        /// User that logged out.
        username: String,
    },

    /// Error occurred.
    Error {
        /// Error description.
        message: String,
    },
}

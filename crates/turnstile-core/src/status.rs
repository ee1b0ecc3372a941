//! Status snapshots produced by the guard.
//!
//! These are plain data: the guard fills them, callers render them. The
//! `Display` impl of [`SecurityStatus`] is the text report printed by the
//! demo and shown on the dashboard.

use std::fmt;

use chrono::NaiveDateTime;

use crate::clock::format_timestamp;

const RULE_WIDTH: usize = 70;

/// A locked-out user with the failure count that triggered the lockout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedUser {
    /// Username in the blocked set.
    pub username: String,
    /// Retained failure counter.
    pub failed_attempts: u32,
}

/// A user that is not blocked but has failed at least once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUser {
    /// Username with an active counter.
    pub username: String,
    /// Consecutive failures so far.
    pub failed_attempts: u32,
    /// Counter has reached the warning level.
    pub near_threshold: bool,
}

/// Point-in-time security report.
///
/// Both lists are sorted lexicographically by username and never overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityStatus {
    /// When the report was generated.
    pub generated_at: NaiveDateTime,
    /// Configured threshold.
    pub max_attempts: u32,
    /// Locked-out users.
    pub blocked: Vec<BlockedUser>,
    /// Users with failures that are not locked out.
    pub pending: Vec<PendingUser>,
}

impl fmt::Display for SecurityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "SECURITY STATUS REPORT")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Generated: {}", format_timestamp(self.generated_at))?;
        writeln!(f, "Max Failed Attempts: {}", self.max_attempts)?;
        writeln!(f)?;

        if self.blocked.is_empty() {
            writeln!(f, "No blocked users")?;
        } else {
            writeln!(f, "Blocked Users ({}):", self.blocked.len())?;
            for user in &self.blocked {
                writeln!(f, "   - {} (Failed attempts: {})", user.username, user.failed_attempts)?;
            }
        }
        writeln!(f)?;

        if self.pending.is_empty() {
            writeln!(f, "No recent failed attempts")?;
        } else {
            writeln!(f, "Users with Failed Attempts:")?;
            for user in &self.pending {
                let marker = if user.near_threshold { "! " } else { "  " };
                writeln!(
                    f,
                    "   {marker}{}: {}/{} attempts",
                    user.username, user.failed_attempts, self.max_attempts
                )?;
            }
        }

        write!(f, "{rule}")
    }
}

/// Configuration and counters shown on the system information screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    /// Configured threshold.
    pub max_attempts: u32,
    /// Where audit lines go.
    pub log_location: String,
    /// Number of accounts in the credential table.
    pub registered_users: usize,
    /// Size of the blocked set.
    pub blocked_users: usize,
    /// Usernames with a failure counter (blocked ones included).
    pub active_failed_attempts: usize,
}

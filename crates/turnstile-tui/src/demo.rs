//! Scripted walkthrough of the guard.
//!
//! Drives a file-logging guard through a fixed scenario and narrates each
//! step to a writer:
//!
//! 1. successful login as `admin`
//! 2. one failed login as `admin`
//! 3. five failures locking out `testuser`
//! 4. security status report
//! 5. blocked list as shown before unblocking
//! 6. unblocking the first blocked user
//! 7. last [`DEMO_LOG_TAIL`] audit lines

use std::{
    io::{self, Write},
    path::PathBuf,
    thread,
    time::Duration,
};

use thiserror::Error;
use turnstile_core::{AuditError, AuthOutcome, Clock, ConfigError, GuardConfig};

/// Audit log used by the demo unless overridden.
pub const DEMO_LOG_FILE: &str = "demo_security_log.txt";

/// Number of audit lines printed at the end.
pub const DEMO_LOG_TAIL: usize = 10;

/// Username locked out during the demo.
pub const DEMO_TARGET: &str = "testuser";

const RULE_WIDTH: usize = 60;

/// Demo errors.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Narration could not be written.
    #[error("output error: {0}")]
    Io(#[from] io::Error),

    /// Guard could not be built.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Demo parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOptions {
    /// Audit log path.
    pub log_file: PathBuf,
    /// Lockout threshold.
    pub max_attempts: u32,
    /// Pause between steps.
    pub pause: Duration,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEMO_LOG_FILE),
            max_attempts: turnstile_core::DEFAULT_MAX_ATTEMPTS,
            pause: Duration::from_millis(1000),
        }
    }
}

/// What the demo observed, for callers that want to check the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSummary {
    /// Users blocked after the lockout step, sorted.
    pub blocked_after_lockout: Vec<String>,
    /// Users blocked at the end.
    pub blocked_at_end: Vec<String>,
    /// Audit lines printed in the final step.
    pub log_tail: Vec<String>,
}

/// Run the scripted demo, narrating to `out`.
pub fn run<W: Write, C: Clock>(
    out: &mut W,
    options: &DemoOptions,
    clock: C,
) -> Result<DemoSummary, DemoError> {
    let pause = |factor: u32| thread::sleep(options.pause * factor / 2);

    writeln!(out, "AUTOMATED DEMO - Turnstile Secure Login")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    pause(2);

    writeln!(out, "\n1. Initializing system...")?;
    let config = GuardConfig {
        max_attempts: options.max_attempts,
        log_file: options.log_file.clone(),
        ..GuardConfig::default()
    };
    let mut guard = config.build(clock)?;
    tracing::info!(log_file = %options.log_file.display(), "demo guard ready");
    pause(1);

    section(out, "2. Successful Login")?;
    writeln!(out, "Attempting login with: admin / password123")?;
    let outcome = guard.authenticate("admin", "password123");
    writeln!(out, "Result: {}", if outcome.is_granted() { "SUCCESS" } else { "FAILED" })?;
    pause(2);

    section(out, "3. Failed Login Attempt")?;
    writeln!(out, "Attempting login with: admin / wrongpassword")?;
    let outcome = guard.authenticate("admin", "wrongpassword");
    let result = if outcome.is_granted() { "SUCCESS" } else { "FAILED (as expected)" };
    writeln!(out, "Result: {result}")?;
    pause(2);

    let max = options.max_attempts;
    section(out, &format!("4. Account Lockout ({max} Failed Attempts)"))?;
    for i in 1..=max {
        writeln!(out, "\nAttempt {i}/{max}: {DEMO_TARGET} / wrongpass{i}")?;
        let outcome = guard.authenticate(DEMO_TARGET, &format!("wrongpass{i}"));
        narrate_outcome(out, DEMO_TARGET, outcome)?;
        pause(1);
    }

    section(out, "5. Security Status Report")?;
    writeln!(out, "{}", guard.status())?;
    pause(2);

    section(out, "6. Blocked Users List (for Unblock Menu)")?;
    let blocked = guard.blocked_with_attempts();
    let blocked_after_lockout: Vec<String> = blocked.iter().map(|b| b.username.clone()).collect();
    if !blocked.is_empty() {
        writeln!(out, "\nCurrently Blocked Users ({}):", blocked.len())?;
        for (i, user) in blocked.iter().enumerate() {
            writeln!(
                out,
                "  {}. {} - Failed attempts: {}",
                i.saturating_add(1),
                user.username,
                user.failed_attempts
            )?;
        }
    }
    pause(2);

    section(out, "7. Unblocking User")?;
    if let Some(first) = blocked_after_lockout.first() {
        writeln!(out, "Unblocking: {first}")?;
        if guard.unblock(first) {
            writeln!(out, "{first} has been unblocked!")?;
        }
    }
    pause(2);

    section(out, "8. Security Log Entries")?;
    let log_tail = match guard.log_entries() {
        Ok(lines) => {
            let tail = lines[lines.len().saturating_sub(DEMO_LOG_TAIL)..].to_vec();
            writeln!(out, "\nShowing last {DEMO_LOG_TAIL} entries:")?;
            for line in &tail {
                writeln!(out, "{line}")?;
            }
            tail
        },
        Err(AuditError::NotFound(_)) => {
            writeln!(out, "No log file yet")?;
            Vec::new()
        },
        Err(e) => {
            writeln!(out, "Failed to read log: {e}")?;
            Vec::new()
        },
    };

    for failure in guard.take_log_failures() {
        writeln!(out, "[ERROR] Failed to write to log: {failure}")?;
    }

    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "DEMO COMPLETE!")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "\nCheck '{}' to see all logged events", options.log_file.display())?;

    Ok(DemoSummary { blocked_after_lockout, blocked_at_end: guard.blocked_users(), log_tail })
}

fn section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{title}")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

fn narrate_outcome<W: Write>(out: &mut W, username: &str, outcome: AuthOutcome) -> io::Result<()> {
    match outcome {
        AuthOutcome::Granted => writeln!(out, "Login successful! Welcome, {username}!"),
        AuthOutcome::Denied { remaining, .. } => {
            writeln!(out, "Invalid username or password.")?;
            writeln!(out, "Warning: {remaining} attempt(s) remaining before lockout.")
        },
        AuthOutcome::LockedOut { .. } => {
            writeln!(out, "Invalid username or password.")?;
            writeln!(
                out,
                "User '{username}' is temporarily blocked due to too many failed attempts."
            )
        },
        AuthOutcome::Blocked => writeln!(
            out,
            "User '{username}' is temporarily blocked due to too many failed attempts."
        ),
    }
}

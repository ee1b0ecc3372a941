//! Automated demo of the Turnstile guard.
//!
//! Runs the scripted walkthrough against a real log file and prints the
//! narration to stdout.
//!
//! ```bash
//! turnstile-demo --pause-ms 0 --log-file /tmp/demo.log
//! ```

use std::{io, path::PathBuf, time::Duration};

use clap::Parser;
use turnstile_core::SystemClock;
use turnstile_tui::{
    demo::{self, DEMO_LOG_FILE, DemoOptions},
    logging,
};

/// Turnstile automated demo
#[derive(Parser, Debug)]
#[command(name = "turnstile-demo")]
#[command(about = "Scripted walkthrough: login, lockout, status, unblock, log tail")]
#[command(version)]
struct Args {
    /// Audit log path
    #[arg(short, long, default_value = DEMO_LOG_FILE)]
    log_file: PathBuf,

    /// Consecutive failures before lockout
    #[arg(short, long, default_value_t = turnstile_core::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Pause between steps in milliseconds
    #[arg(long, default_value_t = 1000)]
    pause_ms: u64,

    /// Log level for diagnostics on stderr (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init_stderr(&args.log_level);

    let options = DemoOptions {
        log_file: args.log_file,
        max_attempts: args.max_attempts,
        pause: Duration::from_millis(args.pause_ms),
    };

    let mut stdout = io::stdout().lock();
    let summary = demo::run(&mut stdout, &options, SystemClock)?;
    tracing::info!(blocked = summary.blocked_at_end.len(), "demo finished");
    Ok(())
}

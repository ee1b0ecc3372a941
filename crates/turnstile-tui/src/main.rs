//! Turnstile interactive login console.
//!
//! # Usage
//!
//! ```bash
//! # Demo accounts, 5 attempts, ./security_log.txt
//! turnstile
//!
//! # Settings from a file, threshold overridden on the command line
//! turnstile --config turnstile.toml --max-attempts 3
//!
//! # Diagnostics to a file (the terminal is taken by the UI)
//! RUST_LOG=debug turnstile --trace-file turnstile.trace
//! ```

use std::path::PathBuf;

use clap::Parser;
use turnstile_core::{GuardConfig, SystemClock};
use turnstile_tui::{App, GuardBridge, Runtime, TerminalDriver, logging};

/// Turnstile login console
#[derive(Parser, Debug)]
#[command(name = "turnstile")]
#[command(about = "Login simulator with failed-attempt lockout and audit logging")]
#[command(version)]
struct Args {
    /// TOML config file (max_attempts, warn_at, log_file, [credentials])
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Consecutive failures before lockout (overrides the config file)
    #[arg(short, long)]
    max_attempts: Option<u32>,

    /// Audit log path (overrides the config file)
    #[arg(short, long)]
    log_file: Option<PathBuf>,

    /// Do not list the configured accounts on the login screen
    #[arg(long)]
    hide_accounts: bool,

    /// Write diagnostics to this file
    #[arg(long)]
    trace_file: Option<PathBuf>,
}

impl Args {
    /// Layer command-line flags over the config file (or defaults).
    fn guard_config(&self) -> Result<GuardConfig, turnstile_core::ConfigError> {
        let mut config = match &self.config {
            Some(path) => GuardConfig::load(path)?,
            None => GuardConfig::default(),
        };
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file.clone_from(log_file);
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.trace_file {
        logging::init_file(path, "info")?;
    }

    let config = args.guard_config()?;
    let guard = config.build(SystemClock)?;

    let account_hints = if args.hide_accounts {
        Vec::new()
    } else {
        guard.credentials().iter().map(|(user, secret)| format!("{user} / {secret}")).collect()
    };

    tracing::info!(
        max_attempts = config.max_attempts,
        log_file = %config.log_file.display(),
        "starting console"
    );

    let driver = TerminalDriver::new()?;
    let mut runtime = Runtime::new(driver, App::new(account_hints), GuardBridge::new(guard));
    let reason = runtime.run().await?;

    tracing::info!(?reason, "console exited");
    Ok(())
}

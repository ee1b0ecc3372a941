//! Diagnostics setup for the binaries.
//!
//! Diagnostics are separate from the audit log: they carry `tracing` events
//! for debugging and are filtered with `RUST_LOG`. The interactive console
//! owns the terminal, so it only ever traces to a file.

#![allow(clippy::disallowed_types, reason = "Writer shared by the fmt layer only")]

use std::{fs::File, io, path::Path, sync::Mutex};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Trace to `path` (appending), filtered by `RUST_LOG` or `default_level`.
pub fn init_file(path: &Path, default_level: &str) -> io::Result<()> {
    let file = File::options().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

/// Trace to stderr, filtered by `RUST_LOG` or `default_level`.
pub fn init_stderr(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

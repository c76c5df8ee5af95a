// src/log.rs
//
// Two sinks: human-readable lines on stderr (level from -v / RUST_LOG) and a
// plain debug log at .store/debug.log, stamped with time since start.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::{self, time::Uptime};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::consts::{LOG_FILE, STORE_DIR};
use crate::error::ScrapeError;
use crate::file::ensure_directory;

fn stderr_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Appends to the debug log across runs.
pub fn init(verbosity: u8) -> Result<(), ScrapeError> {
    let store = Path::new(STORE_DIR);
    ensure_directory(store)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(store.join(LOG_FILE))?;

    let stderr_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,unfccc_scrape={}", stderr_level(verbosity)))
    });
    let file_filter = EnvFilter::new("warn,unfccc_scrape=debug");

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);
    let file_layer = fmt::layer()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_timer(Uptime::default())
        .with_filter(file_filter);

    let subscriber = Registry::default().with(stderr_layer).with(file_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ScrapeError::Config(format!("logging already initialised: {e}")))?;
    Ok(())
}

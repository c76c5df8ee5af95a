// src/runner.rs
use std::path::PathBuf;

use tracing::{error, warn};

use crate::{
    browser::{self, Session},
    config::options::AppOptions,
    data::Envelope,
    error::ScrapeError,
    file::export_envelope,
    progress::Progress,
    scrape::collect_calls,
};

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub calls: usize,
    pub submissions: usize,
    pub files_written: Vec<PathBuf>,
}

/// Scrape with an already open session, then close it whatever the outcome.
pub async fn scrape_with<S: Session>(
    session: &mut S,
    opts: &AppOptions,
    progress: &mut dyn Progress,
) -> Result<Envelope, ScrapeError> {
    let result = collect_calls(session, opts, progress).await;
    if let Err(e) = &result {
        error!(error = %e, "scrape failed");
    }
    if let Err(e) = session.close().await {
        warn!(error = %e, "closing the browser session failed");
    }
    progress.finish();
    result
}

/// Write the envelope in every configured format.
pub fn export(opts: &AppOptions, envelope: &Envelope) -> Result<RunSummary, ScrapeError> {
    let files_written = export_envelope(&opts.export, envelope)?;
    Ok(RunSummary {
        calls: envelope.records.len(),
        submissions: envelope.submission_count(),
        files_written,
    })
}

/// Scrape, close, then export.
/// Nothing is written unless the scrape as a whole succeeded.
pub async fn run_with<S: Session>(
    session: &mut S,
    opts: &AppOptions,
    progress: &mut dyn Progress,
) -> Result<RunSummary, ScrapeError> {
    let envelope = scrape_with(session, opts, progress).await?;
    export(opts, &envelope)
}

/// Top-level: launch the browser, then `run_with`.
pub async fn run(opts: &AppOptions, progress: &mut dyn Progress) -> Result<RunSummary, ScrapeError> {
    opts.validate()?;
    let mut session = browser::launch(&opts.browser, &opts.site).await?;
    run_with(&mut session, opts, progress).await
}

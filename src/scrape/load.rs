// src/scrape/load.rs
use tokio::time::sleep;
use tracing::{debug, info};

use crate::browser::Session;
use crate::config::options::ScrapeOptions;
use crate::error::ScrapeError;
use crate::specs::calls::advertised_total;
use crate::specs::{Element, Parser, is_complete};

/// Navigate to the portal, reset the topic filter and wait for the panels.
pub async fn load_page<S: Session>(session: &mut S, opts: &ScrapeOptions) -> Result<(), ScrapeError> {
    let t = &opts.timing;
    session.goto(&opts.url).await?;
    sleep(t.short()).await;

    let clear = session.find_first(Element::ClearTags).await?;
    session.click(&clear).await?;
    sleep(t.long()).await;

    session.wait_for(Element::PanelToggle, t.timeout()).await
}

/// Panel counts of the loaded page, or `Incomplete` when they fail the sanity check.
async fn check_counts<S: Session>(
    session: &mut S,
    opts: &ScrapeOptions,
    parser: &Parser,
) -> Result<Vec<Option<u32>>, ScrapeError> {
    let html = session.source().await?;
    let counts = parser.panel_counts(&html);
    let found = advertised_total(&counts);
    debug!(?counts, found, minimum = opts.min_documents, "panel counts");
    if is_complete(&counts, opts.min_documents) {
        info!(panels = counts.len(), documents = found, "portal loaded");
        Ok(counts)
    } else {
        Err(ScrapeError::Incomplete { found, minimum: opts.min_documents })
    }
}

/// Load the portal until the advertised document counts look complete.
///
/// Reloads up to `max_retries` times. When the last attempt still comes up
/// short the run ends with `Untrustworthy`; no output should be written.
pub async fn visit_main_page<S: Session>(
    session: &mut S,
    opts: &ScrapeOptions,
    parser: &Parser,
) -> Result<Vec<Option<u32>>, ScrapeError> {
    let mut attempts = opts.load_policy().start("portal load");
    loop {
        let outcome = match load_page(session, opts).await {
            Ok(()) => check_counts(session, opts, parser).await,
            Err(e) => Err(e),
        };
        let err = match outcome {
            Ok(counts) => return Ok(counts),
            Err(e) => e,
        };
        match attempts.failed(err).await {
            Ok(()) => {}
            Err(ScrapeError::Exhausted { attempts, last, .. }) => {
                return Err(match *last {
                    ScrapeError::Incomplete { found, minimum } => {
                        ScrapeError::Untrustworthy { found, minimum, attempts }
                    }
                    other => ScrapeError::Exhausted { what: s!("portal load"), attempts, last: Box::new(other) },
                });
            }
            Err(fatal) => return Err(fatal),
        }
    }
}

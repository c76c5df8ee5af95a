// src/scrape/panels.rs
//
// Opening one panel and walking its pages.
//
// Only one panel is open at a time. A panel toggle handle goes stale as soon
// as the page reloads, so every reload hands back a fresh set of toggles and
// the caller keeps using those for the remaining panels.

use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::load::visit_main_page;
use crate::browser::Session;
use crate::config::options::ScrapeOptions;
use crate::core::RetryPolicy;
use crate::data::SubmissionCall;
use crate::error::ScrapeError;
use crate::progress::Progress;
use crate::specs::{Element, Field, Parser};

async fn click_until_accepted<S: Session>(
    session: &mut S,
    handle: &S::Handle,
    policy: RetryPolicy,
) -> Result<(), ScrapeError> {
    let mut attempts = policy.start("panel toggle click");
    loop {
        match session.click(handle).await {
            Ok(()) => return Ok(()),
            Err(e) => attempts.failed(e).await?,
        }
    }
}

async fn try_open<S: Session>(
    session: &mut S,
    toggles: &[S::Handle],
    index: usize,
    opts: &ScrapeOptions,
) -> Result<(), ScrapeError> {
    let handle = toggles
        .get(index)
        .ok_or_else(|| ScrapeError::NotFound(format!("panel toggle #{index}")))?;
    click_until_accepted(session, handle, opts.click_policy()).await?;
    session.wait_for(Element::CallArea, opts.timing.timeout()).await?;
    session.wait_for(Element::Field(Field::Issue), opts.timing.short()).await
}

/// Open panel `index` and wait until its calls have rendered.
///
/// A failed attempt reloads the portal (`visit_main_page`) and replaces
/// `toggles` with the fresh handles before trying again.
pub async fn open_panel<S: Session>(
    session: &mut S,
    toggles: &mut Vec<S::Handle>,
    index: usize,
    opts: &ScrapeOptions,
    parser: &Parser,
) -> Result<(), ScrapeError> {
    let mut attempts = opts.panel_policy().start("open panel");
    loop {
        if attempts.is_retry() {
            visit_main_page(session, opts, parser).await?;
            *toggles = session.find_all(Element::PanelToggle).await?;
            debug!(panel = index, toggles = toggles.len(), "reloaded panel toggles");
        }
        let err = match try_open(session, toggles.as_slice(), index, opts).await {
            Ok(()) => {
                info!(panel = index, attempt = attempts.number(), "panel open");
                return Ok(());
            }
            Err(e) => e,
        };
        match attempts.failed(err).await {
            Ok(()) => {}
            Err(ScrapeError::Exhausted { attempts, last, .. }) => {
                return Err(ScrapeError::PanelNotLoaded { panel: index, attempts, last });
            }
            Err(fatal) => return Err(fatal),
        }
    }
}

/// Parse the open panel's grid, following the pager until it runs out.
pub async fn collect_pages<S: Session>(
    session: &mut S,
    parser: &Parser,
    opts: &ScrapeOptions,
    panel: usize,
    progress: &mut dyn Progress,
) -> Result<Vec<SubmissionCall>, ScrapeError> {
    let mut calls = Vec::new();
    let mut page = 1;
    loop {
        let html = session.source().await?;
        let url = session.current_url().await?;
        let parsed = parser.parse_grid(&html, &url);
        debug!(panel, page, calls = parsed.len(), "page parsed");
        progress.page_done(panel, page, parsed.len());
        calls.extend(parsed);

        if !parser.has_next_page(&html) {
            break;
        }
        let next = match session.find_first(Element::NextPage).await {
            Ok(h) => h,
            Err(e) => {
                warn!(panel, page, error = %e, "next page control vanished, stopping");
                break;
            }
        };
        if let Err(e) = session.click(&next).await {
            warn!(panel, page, error = %e, "next page click failed, stopping");
            break;
        }
        session.wait_for(Element::CallArea, opts.timing.timeout()).await?;
        session.scroll_to_bottom().await?;
        sleep(opts.timing.short()).await;
        page += 1;
    }
    info!(panel, pages = page, calls = calls.len(), "panel collected");
    Ok(calls)
}

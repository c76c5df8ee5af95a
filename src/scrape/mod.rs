// src/scrape/mod.rs
mod load;
mod panels;

pub use load::{load_page, visit_main_page};
pub use panels::{collect_pages, open_panel};

use tracing::info;

use crate::browser::Session;
use crate::config::options::AppOptions;
use crate::data::Envelope;
use crate::error::ScrapeError;
use crate::progress::Progress;
use crate::specs::{Element, Parser};

/// Top-level: load the portal, then open and collect every panel in order (no IO).
pub async fn collect_calls<S: Session>(
    session: &mut S,
    opts: &AppOptions,
    progress: &mut dyn Progress,
) -> Result<Envelope, ScrapeError> {
    let parser = Parser::new(&opts.site, &opts.scrape.entity_types)?;
    let scrape = &opts.scrape;

    progress.log("Loading portal...");
    visit_main_page(session, scrape, &parser).await?;
    let mut toggles = session.find_all(Element::PanelToggle).await?;
    let panels = toggles.len();
    progress.begin(panels);

    let mut records = Vec::new();
    for panel in 0..panels {
        open_panel(session, &mut toggles, panel, scrape, &parser).await?;
        let calls = collect_pages(session, &parser, scrape, panel, progress).await?;
        progress.item_done(panel, calls.len());
        records.extend(calls);
    }

    let envelope = Envelope::new(scrape.url.as_str(), records);
    info!(
        calls = envelope.records.len(),
        submissions = envelope.submission_count(),
        "scrape complete"
    );
    Ok(envelope)
}

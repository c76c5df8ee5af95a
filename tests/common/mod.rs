// tests/common/mod.rs
#![allow(dead_code)]

use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};

use unfccc_scrape::browser::Session;
use unfccc_scrape::config::options::{AppOptions, Timing};
use unfccc_scrape::progress::Progress;
use unfccc_scrape::specs::{Element, SiteMap};
use unfccc_scrape::ScrapeError;

pub const PAGE_URL: &str = "https://www4.unfccc.int/sites/submissionsstaging/Pages/Home.aspx";

/* ---------------- HTML builders ---------------- */

/// Portal landing page: one collapsed toggle per title, plus the clear-tags button.
pub fn main_page(titles: &[&str]) -> String {
    let toggles: String = titles
        .iter()
        .map(|t| format!(r#"<div class="panel panel-default"><a class="collapsed">{t}</a></div>"#))
        .collect();
    format!(
        r#"<html><body><button id="btnClearTags">Clear</button><div class="panel-group">{toggles}</div></body></html>"#
    )
}

pub fn call(issue: &str, sections: &str) -> String {
    format!(
        r#"<div class="soby_gridcell">
             <div class="submissioncallarea"><div>
               <div class="col-md-10 issue">{issue}</div>
               <div class="col-md-7 deadline">31 March 2024</div>
               <div class="col-md-10 cfstitle">Title of {issue}</div>
               <div class="col-md-10 mandate">Mandate of {issue}</div>
             </div></div>
             <div class="container submissionarea">{sections}</div>
           </div>"#
    )
}

pub fn section(entity_type: &str, rows: &str) -> String {
    format!(r#"<div class="submissionssection" entitytype="{entity_type}">{rows}</div>"#)
}

pub fn row(name: &str, file_ref: &str) -> String {
    format!(
        r#"<div class="row tablefilerow" fileref="{file_ref}">
             <div class="col-sm-4 filename">{name}</div>
             <div class="col-sm-4 entity">Chile</div>
             <div class="col-sm-2 language">English</div>
             <div class="col-sm-2 submissiondate">01/02/2024</div>
           </div>"#
    )
}

/// One page of an open panel.
pub fn panel_page(calls: &[String], has_next: bool) -> String {
    let pager = if has_next {
        r#"<a href="javascript:void(0)" onclick="soby_grid.GoToNextPage()">Next</a>"#
    } else {
        ""
    };
    format!(
        r#"<html><body><div class="panel-collapse collapse in">{}</div>{pager}</body></html>"#,
        calls.concat()
    )
}

/// Panel that opened but never rendered its calls.
pub fn empty_panel() -> String {
    r#"<html><body><div class="panel-collapse collapse in"></div></body></html>"#.to_string()
}

/* ---------------- In-memory session ---------------- */

/// Serves fixture pages in place of a browser.
///
/// `goto` serves `loads` in turn (the last one repeats). Clicking panel
/// toggle `i` shows `panels[i][0]`; each next-page click moves one page on.
pub struct FixtureSession {
    site: SiteMap,
    loads: Vec<String>,
    panels: Vec<Vec<String>>,
    current: String,
    open: Option<(usize, usize)>,

    pub toggle_click_failures: u32,
    pub next_click_failures: u32,
    pub broken_opens: u32,

    pub gotos: usize,
    pub clear_clicks: usize,
    pub scrolls: usize,
    pub close_calls: usize,
}

impl FixtureSession {
    pub fn new(loads: Vec<String>, panels: Vec<Vec<String>>) -> Self {
        Self {
            site: SiteMap::default(),
            loads,
            panels,
            current: String::new(),
            open: None,
            toggle_click_failures: 0,
            next_click_failures: 0,
            broken_opens: 0,
            gotos: 0,
            clear_clicks: 0,
            scrolls: 0,
            close_calls: 0,
        }
    }

    fn count(&self, element: Element) -> usize {
        let sel = Selector::parse(self.site.selector(element)).unwrap();
        Html::parse_document(&self.current).select(&sel).count()
    }

    fn not_clickable(what: &str) -> ScrapeError {
        ScrapeError::NotFound(format!("{what} not clickable"))
    }
}

#[async_trait]
impl Session for FixtureSession {
    type Handle = (Element, usize);

    async fn goto(&mut self, _url: &str) -> Result<(), ScrapeError> {
        let i = self.gotos.min(self.loads.len() - 1);
        self.current = self.loads[i].clone();
        self.open = None;
        self.gotos += 1;
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String, ScrapeError> {
        Ok(PAGE_URL.to_string())
    }

    async fn source(&mut self) -> Result<String, ScrapeError> {
        Ok(self.current.clone())
    }

    async fn find_all(&mut self, element: Element) -> Result<Vec<(Element, usize)>, ScrapeError> {
        Ok((0..self.count(element)).map(|i| (element, i)).collect())
    }

    async fn click(&mut self, handle: &(Element, usize)) -> Result<(), ScrapeError> {
        match *handle {
            (Element::ClearTags, _) => {
                self.clear_clicks += 1;
            }
            (Element::PanelToggle, i) => {
                if self.toggle_click_failures > 0 {
                    self.toggle_click_failures -= 1;
                    return Err(Self::not_clickable("panel toggle"));
                }
                if self.broken_opens > 0 {
                    self.broken_opens -= 1;
                    self.current = empty_panel();
                    return Ok(());
                }
                self.current = self.panels[i][0].clone();
                self.open = Some((i, 0));
            }
            (Element::NextPage, _) => {
                if self.next_click_failures > 0 {
                    self.next_click_failures -= 1;
                    return Err(Self::not_clickable("next page"));
                }
                let (panel, page) = self.open.expect("next page clicked with no panel open");
                self.current = self.panels[panel][page + 1].clone();
                self.open = Some((panel, page + 1));
            }
            (other, _) => panic!("unexpected click on {other:?}"),
        }
        Ok(())
    }

    async fn wait_for(&mut self, element: Element, timeout: Duration) -> Result<(), ScrapeError> {
        if self.count(element) > 0 {
            Ok(())
        } else {
            Err(ScrapeError::Timeout { what: format!("{element:?}"), secs: timeout.as_secs() })
        }
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), ScrapeError> {
        self.scrolls += 1;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ScrapeError> {
        self.close_calls += 1;
        Ok(())
    }
}

/* ---------------- Options + progress ---------------- */

/// Defaults with every sleep and wait at zero.
pub fn fast_options() -> AppOptions {
    let mut opts = AppOptions::default();
    opts.scrape.timing = Timing::instant();
    opts
}

#[derive(Default)]
pub struct RecordingProgress {
    pub panels: Option<usize>,
    pub pages: Vec<(usize, usize, usize)>,
    pub panels_done: Vec<(usize, usize)>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, panels: usize) {
        self.panels = Some(panels);
    }
    fn page_done(&mut self, panel: usize, page: usize, calls: usize) {
        self.pages.push((panel, page, calls));
    }
    fn item_done(&mut self, panel: usize, calls: usize) {
        self.panels_done.push((panel, calls));
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

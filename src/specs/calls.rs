// src/specs/calls.rs
//
// Pure parsing of the rendered portal page (HTML source as served by the browser).
// Nothing here talks to the browser; the scrape layer feeds page sources in.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::core::sanitize::{normalize_ws, parenthesized_count};
use crate::data::{Buckets, Submission, SubmissionCall};
use crate::error::ScrapeError;
use crate::specs::portal::{Element, Field, SiteMap};

/// Compiled selectors + the entity-type allow-list.
#[derive(Debug)]
pub struct Parser {
    panel_toggle: Selector,
    grid_cell: Selector,
    next_page: Selector,
    section: Selector,
    row: Selector,
    call_fields: [Selector; 4],
    submission_fields: [Selector; 4],
    entity_type_attr: String,
    file_ref_attr: String,
    base_path: String,
    entity_types: Vec<String>,
}

fn compile(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: s!(css),
        reason: e.to_string(),
    })
}

fn compile_fields(map: &SiteMap, [a, b, c, d]: [Field; 4]) -> Result<[Selector; 4], ScrapeError> {
    Ok([
        compile(map.field(a))?,
        compile(map.field(b))?,
        compile(map.field(c))?,
        compile(map.field(d))?,
    ])
}

impl Parser {
    pub fn new(map: &SiteMap, entity_types: &[String]) -> Result<Self, ScrapeError> {
        Ok(Self {
            panel_toggle: compile(map.selector(Element::PanelToggle))?,
            grid_cell: compile(map.selector(Element::GridCell))?,
            next_page: compile(map.selector(Element::NextPage))?,
            section: compile(map.selector(Element::Section))?,
            row: compile(map.selector(Element::SubmissionRow))?,
            call_fields: compile_fields(map, Field::CALL)?,
            submission_fields: compile_fields(map, Field::SUBMISSION)?,
            entity_type_attr: map.entity_type_attr.clone(),
            file_ref_attr: map.file_ref_attr.clone(),
            base_path: map.base_path.clone(),
            entity_types: entity_types.to_vec(),
        })
    }

    pub fn is_relevant(&self, entity_type: &str) -> bool {
        self.entity_types.iter().any(|t| t == entity_type)
    }

    /// Document count advertised in each collapsed panel title, in page order.
    /// `None` for a title without a "(N)" suffix.
    pub fn panel_counts(&self, html: &str) -> Vec<Option<u32>> {
        let doc = Html::parse_document(html);
        doc.select(&self.panel_toggle)
            .map(|a| parenthesized_count(&element_text(a)))
            .collect()
    }

    pub fn has_next_page(&self, html: &str) -> bool {
        let doc = Html::parse_document(html);
        doc.select(&self.next_page).next().is_some()
    }

    /// Every call rendered in the currently open panel.
    /// `page_url` is the browser's current URL, used to build file links.
    pub fn parse_grid(&self, html: &str, page_url: &str) -> Vec<SubmissionCall> {
        let doc = Html::parse_document(html);
        doc.select(&self.grid_cell)
            .map(|cell| self.parse_call(cell, page_url))
            .collect()
    }

    fn parse_call(&self, cell: ElementRef<'_>, page_url: &str) -> SubmissionCall {
        let [issue, deadline, title, mandate] = &self.call_fields;

        let mut submissions = Buckets::new();
        for section in cell.select(&self.section) {
            let Some(label) = section.value().attr(&self.entity_type_attr) else {
                debug!("submission section without entity type, skipped");
                continue;
            };
            if !self.is_relevant(label) {
                debug!(entity_type = label, "entity type not in allow-list, skipped");
                continue;
            }
            let rows = section
                .select(&self.row)
                .map(|row| self.parse_submission(row, page_url))
                .collect();
            submissions.push_section(label, rows);
        }

        SubmissionCall {
            issue: first_text(cell, issue),
            deadline: first_text(cell, deadline),
            title: first_text(cell, title),
            mandate: first_text(cell, mandate),
            submissions,
        }
    }

    fn parse_submission(&self, row: ElementRef<'_>, page_url: &str) -> Submission {
        let [name, entity, language, date] = &self.submission_fields;
        Submission {
            name: first_text(row, name),
            entity: first_text(row, entity),
            language: first_text(row, language),
            date: first_text(row, date),
            url: row
                .value()
                .attr(&self.file_ref_attr)
                .map(|file_ref| submission_url(page_url, &self.base_path, file_ref)),
        }
    }
}

/// The portal passes when every panel title carries a count and the counts
/// add up to at least `minimum`.
pub fn is_complete(counts: &[Option<u32>], minimum: u32) -> bool {
    let mut total: u32 = 0;
    for count in counts {
        match count {
            Some(n) => total = total.saturating_add(*n),
            None => return false,
        }
    }
    total >= minimum
}

/// Sum of the counts that are present.
pub fn advertised_total(counts: &[Option<u32>]) -> u32 {
    counts.iter().flatten().fold(0u32, |acc, n| acc.saturating_add(*n))
}

/// Absolute link for a submitted file.
///
/// The portal's file references are site-relative; the page URL is
/// `<origin><base_path>[...]`, so swapping `base_path` for the reference yields
/// the file's URL with the origin (and anything after the base path) kept.
/// When the page URL does not contain `base_path` the reference is resolved
/// against the page URL instead.
pub fn submission_url(page_url: &str, base_path: &str, file_ref: &str) -> String {
    if !base_path.is_empty() && page_url.contains(base_path) {
        return page_url.replace(base_path, file_ref);
    }
    match Url::parse(page_url).and_then(|base| base.join(file_ref)) {
        Ok(u) => u.to_string(),
        Err(_) => s!(file_ref),
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

fn first_text(scope: ElementRef<'_>, sel: &Selector) -> Option<String> {
    scope.select(sel).next().map(element_text)
}

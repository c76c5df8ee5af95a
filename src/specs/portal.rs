// src/specs/portal.rs
//! Selector table for the submissions portal.
//!
//! Every CSS selector and attribute name the scraper relies on is listed in
//! [`SiteMap::default`]. Browser actions and offline parsing both resolve
//! [`Element`]s and [`Field`]s through it; nothing else in the crate spells a
//! selector.

use serde::Deserialize;

use crate::config::consts::PORTAL_BASE_PATH;

/// Text fields read from the page.
/// The first four belong to a call, the rest to one submission row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Issue,
    Deadline,
    Title,
    Mandate,
    FileName,
    Entity,
    Language,
    SubmissionDate,
}

impl Field {
    pub const CALL: [Field; 4] = [Field::Issue, Field::Deadline, Field::Title, Field::Mandate];
    pub const SUBMISSION: [Field; 4] =
        [Field::FileName, Field::Entity, Field::Language, Field::SubmissionDate];
}

/// Page elements the browser interacts with or the parser walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    /// "Clear tags" button that resets the portal's topic filter.
    ClearTags,
    /// Collapsed panel header link; its text carries the "(N)" document count.
    PanelToggle,
    /// Call area rendered once a panel has opened.
    CallArea,
    /// One submission call inside the currently open panel.
    GridCell,
    /// Pager link to the next page of the open panel.
    NextPage,
    /// Per-entity-type group of submissions inside a call.
    Section,
    /// One submitted file inside a section.
    SubmissionRow,
    Field(Field),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteMap {
    /// Path segment of the portal page that file references replace.
    pub base_path: String,

    pub clear_tags: String,
    pub panel_toggle: String,
    pub call_area: String,
    pub grid_cell: String,
    pub next_page: String,
    pub section: String,
    pub submission_row: String,

    // Call fields, relative to a grid cell
    pub issue: String,
    pub deadline: String,
    pub title: String,
    pub mandate: String,

    // Submission fields, relative to a row
    pub file_name: String,
    pub entity: String,
    pub language: String,
    pub submission_date: String,

    pub entity_type_attr: String,
    pub file_ref_attr: String,
}

impl Default for SiteMap {
    fn default() -> Self {
        Self {
            base_path: s!(PORTAL_BASE_PATH),

            clear_tags: s!("#btnClearTags"),
            panel_toggle: s!(r#"div.panel-group a[class="collapsed"]"#),
            call_area: s!("div.submissioncallarea"),
            grid_cell: s!("div.panel-collapse.collapse.in div.soby_gridcell"),
            next_page: s!(r#"a[onclick*=".GoToNextPage()"]"#),
            section: s!("div.container.submissionarea > div.submissionssection"),
            submission_row: s!("div.row.tablefilerow"),

            issue: s!("div.submissioncallarea > div div.col-md-10.issue"),
            deadline: s!("div.submissioncallarea > div div.col-md-7.deadline"),
            title: s!("div.submissioncallarea > div div.col-md-10.cfstitle"),
            mandate: s!("div.submissioncallarea > div div.col-md-10.mandate"),

            file_name: s!("div.col-sm-4.filename"),
            entity: s!("div.col-sm-4.entity"),
            language: s!("div.col-sm-2.language"),
            submission_date: s!("div.col-sm-2.submissiondate"),

            entity_type_attr: s!("entitytype"),
            file_ref_attr: s!("fileref"),
        }
    }
}

impl SiteMap {
    pub fn selector(&self, element: Element) -> &str {
        match element {
            Element::ClearTags => &self.clear_tags,
            Element::PanelToggle => &self.panel_toggle,
            Element::CallArea => &self.call_area,
            Element::GridCell => &self.grid_cell,
            Element::NextPage => &self.next_page,
            Element::Section => &self.section,
            Element::SubmissionRow => &self.submission_row,
            Element::Field(f) => self.field(f),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Issue => &self.issue,
            Field::Deadline => &self.deadline,
            Field::Title => &self.title,
            Field::Mandate => &self.mandate,
            Field::FileName => &self.file_name,
            Field::Entity => &self.entity,
            Field::Language => &self.language,
            Field::SubmissionDate => &self.submission_date,
        }
    }

    /// All (name, selector) pairs, for validation and error messages.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("clear_tags", &self.clear_tags),
            ("panel_toggle", &self.panel_toggle),
            ("call_area", &self.call_area),
            ("grid_cell", &self.grid_cell),
            ("next_page", &self.next_page),
            ("section", &self.section),
            ("submission_row", &self.submission_row),
            ("issue", &self.issue),
            ("deadline", &self.deadline),
            ("title", &self.title),
            ("mandate", &self.mandate),
            ("file_name", &self.file_name),
            ("entity", &self.entity),
            ("language", &self.language),
            ("submission_date", &self.submission_date),
        ]
    }
}

// src/specs/mod.rs
//! # Page specs
//!
//! Everything that knows what the submissions portal looks like.
//!
//! ## What lives here
//! - **The selector table** (`portal::SiteMap`): one CSS selector per semantic
//!   element or field, plus the two attribute names (`entitytype`, `fileref`)
//!   and the portal's base path. When the site changes, this table changes.
//! - **Pure HTML parsing** (`calls::Parser`) of the page source the browser
//!   hands back: panel counts, grid cells, submission sections and rows.
//! - **The completeness heuristic** (`calls::is_complete`) and file link
//!   construction (`calls::submission_url`).
//!
//! ## What does **not** live here
//! - Clicking, waiting, reloading, paginating: that is `scrape`.
//! - Talking to the browser: that is `browser`.
//! - Writing files: that is `file` / `csv`.
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::collect_calls → Session::source()
//!                               ↘  specs::calls::Parser::parse_grid(html, url)
//! ```
//!
//! ## Conventions
//! - Missing nodes are `None`, never errors. A selector that does not compile
//!   is an error, reported when the `Parser` is built.
//! - Text is whitespace-normalized (`core::sanitize::normalize_ws`).
//! - Output order is document order.
//! - Specs are testable offline against saved or synthetic HTML.
pub mod calls;
pub mod portal;

pub use calls::{Parser, is_complete, submission_url};
pub use portal::{Element, Field, SiteMap};

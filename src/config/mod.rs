// src/config/mod.rs
pub mod consts;
pub mod load;
pub mod options;

pub use load::{load_file, load_or_default};
pub use options::{AppOptions, BrowserOptions, ExportFormat, ExportOptions, ScrapeOptions, Timing};

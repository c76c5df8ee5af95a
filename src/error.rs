// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("webdriver: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("element not found: {0}")]
    NotFound(String),

    #[error("timed out after {secs}s waiting for {what}")]
    Timeout { what: String, secs: u64 },

    #[error("page lists {found} documents, expected at least {minimum}")]
    Incomplete { found: u32, minimum: u32 },

    #[error(
        "web server is loading a very small number of documents ({found} < {minimum}) \
         after {attempts} attempts, data is not trustworthy"
    )]
    Untrustworthy { found: u32, minimum: u32, attempts: u32 },

    #[error("submissions were not loaded into panel {panel} after {attempts} attempts: {last}")]
    PanelNotLoaded { panel: usize, attempts: u32, last: Box<ScrapeError> },

    #[error("{what}: gave up after {attempts} attempts: {last}")]
    Exhausted { what: String, attempts: u32, last: Box<ScrapeError> },

    #[error("driver: {0}")]
    Driver(String),

    #[error("config: {0}")]
    Config(String),

    #[error("config file: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

impl ScrapeError {
    /// Errors that no amount of reloading will fix.
    /// Retry loops hand these straight back to the caller.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScrapeError::Selector { .. }
                | ScrapeError::Untrustworthy { .. }
                | ScrapeError::PanelNotLoaded { .. }
                | ScrapeError::Driver(_)
                | ScrapeError::Config(_)
                | ScrapeError::ConfigFile(_)
                | ScrapeError::Io(_)
                | ScrapeError::Json(_)
                | ScrapeError::Csv(_)
        )
    }
}

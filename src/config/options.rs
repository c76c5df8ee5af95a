// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use scraper::Selector;
use serde::Deserialize;
use url::Url;

use super::consts::*;
use crate::core::RetryPolicy;
use crate::error::ScrapeError;
use crate::specs::SiteMap;

/// Everything a run needs. Built from defaults, then the optional config
/// file, then command-line/env overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub browser: BrowserOptions,
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
    pub site: SiteMap,
}

impl AppOptions {
    pub fn validate(&self) -> Result<(), ScrapeError> {
        Url::parse(&self.scrape.url)
            .map_err(|e| ScrapeError::Config(format!("invalid portal url {:?}: {e}", self.scrape.url)))?;
        if let Some(wd) = &self.browser.webdriver_url {
            Url::parse(wd)
                .map_err(|e| ScrapeError::Config(format!("invalid webdriver url {wd:?}: {e}")))?;
        }
        if self.scrape.entity_types.is_empty() {
            return Err(ScrapeError::Config(s!("entity type allow-list is empty")));
        }
        if self.export.formats.is_empty() {
            return Err(ScrapeError::Config(s!("no export format selected")));
        }
        if self.export.file_stem.trim().is_empty() {
            return Err(ScrapeError::Config(s!("export file stem is empty")));
        }
        for (name, css) in self.site.entries() {
            Selector::parse(css).map_err(|e| ScrapeError::Selector {
                selector: join!(name, " = ", css),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrowserOptions {
    pub headless: bool,
    /// geckodriver binary, started for the run and killed afterwards.
    pub geckodriver: PathBuf,
    pub port: u16,
    /// Connect to an already running WebDriver server instead of starting geckodriver.
    pub webdriver_url: Option<String>,
    pub poll_interval_ms: u64,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: HEADLESS,
            geckodriver: PathBuf::from(GECKODRIVER_PATH),
            port: WEBDRIVER_PORT,
            webdriver_url: None,
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }
}

impl BrowserOptions {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Where the WebDriver client connects.
    pub fn server_url(&self) -> String {
        match &self.webdriver_url {
            Some(url) => url.clone(),
            None => format!("http://localhost:{}", self.port),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub short_sleep_secs: u64,
    pub long_sleep_secs: u64,
    pub timeout_secs: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            short_sleep_secs: SHORT_SLEEP_SECS,
            long_sleep_secs: LONG_SLEEP_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Timing {
    /// No sleeps, no waits. For offline runs against fixtures.
    pub fn instant() -> Self {
        Self { short_sleep_secs: 0, long_sleep_secs: 0, timeout_secs: 0 }
    }

    pub fn short(&self) -> Duration { Duration::from_secs(self.short_sleep_secs) }
    pub fn long(&self) -> Duration { Duration::from_secs(self.long_sleep_secs) }
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScrapeOptions {
    pub url: String,
    /// Minimum sum of the panel title counts for a load to be trusted.
    pub min_documents: u32,
    /// Reloads allowed on top of the first attempt (page load, panel open).
    pub max_retries: u32,
    /// Clicks tried on a panel toggle before the attempt counts as failed.
    pub click_attempts: u32,
    pub entity_types: Vec<String>,
    pub timing: Timing,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            url: s!(PORTAL_URL),
            min_documents: MIN_SUBMISSIONS_SANITY_CHECK,
            max_retries: MAX_RETRIES,
            click_attempts: CLICK_ATTEMPTS,
            entity_types: RELEVANT_ENTITY_TYPES.iter().map(|t| s!(*t)).collect(),
            timing: Timing::default(),
        }
    }
}

impl ScrapeOptions {
    /// Page load + sanity check.
    pub fn load_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries.saturating_add(1), self.timing.long())
    }

    /// Opening a panel (each retry reloads the page first).
    pub fn panel_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries.saturating_add(1), self.timing.long())
    }

    /// Clicking a panel toggle that is not clickable yet.
    pub fn click_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.click_attempts, self.timing.short())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Json => "json", ExportFormat::Csv => "csv" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub file_stem: String,
    pub formats: Vec<ExportFormat>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: s!(DEFAULT_FILE_STEM),
            formats: vec![ExportFormat::Json, ExportFormat::Csv],
        }
    }
}

impl ExportOptions {
    /// `<out_dir>/<file_stem>.<ext>`
    pub fn path_for(&self, format: ExportFormat) -> PathBuf {
        self.out_dir.join(join!(&self.file_stem, ".", format.ext()))
    }

    pub fn set_out_dir(&mut self, dir: impl AsRef<Path>) {
        self.out_dir = dir.as_ref().to_path_buf();
    }
}

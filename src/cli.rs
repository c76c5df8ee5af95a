// src/cli.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{self, options::{AppOptions, ExportFormat}};
use crate::error::ScrapeError;
use crate::progress::Progress;

#[derive(Debug, Parser)]
#[command(name = "unfccc_scrape", version, about = "Scrape UNFCCC submission calls to JSON and CSV")]
pub struct Args {
    /// Portal page to scrape
    #[arg(long, env = "UNFCCC_URL")]
    pub url: Option<String>,

    /// Output directory
    #[arg(short, long, env = "UNFCCC_OUT")]
    pub out: Option<PathBuf>,

    /// Output formats (comma separated)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub format: Option<Vec<ExportFormat>>,

    /// Run Firefox without a window (`--headless false` turns a config file's setting off)
    #[arg(long, env = "UNFCCC_HEADLESS", num_args = 0..=1, default_missing_value = "true")]
    pub headless: Option<bool>,

    /// Minimum total document count for a load to be trusted
    #[arg(long = "min-docs", env = "UNFCCC_MIN_DOCS")]
    pub min_docs: Option<u32>,

    /// Reloads allowed when the page or a panel fails to load
    #[arg(long, env = "UNFCCC_MAX_RETRIES")]
    pub max_retries: Option<u32>,

    /// geckodriver binary to start
    #[arg(long, env = "GECKODRIVER_PATH")]
    pub geckodriver: Option<PathBuf>,

    /// Use a running WebDriver server instead of starting geckodriver
    #[arg(long, env = "WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Port for the geckodriver we start
    #[arg(long, env = "WEBDRIVER_PORT")]
    pub port: Option<u16>,

    /// TOML config file; flags override it
    #[arg(short, long, env = "UNFCCC_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "SECS")]
    pub short_sleep: Option<u64>,

    #[arg(long, value_name = "SECS")]
    pub long_sleep: Option<u64>,

    /// Element wait timeout
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Entity types to keep (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub entity_types: Option<Vec<String>>,

    /// -v debug, -vv trace
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Defaults, then the config file, then flags/env.
    pub fn into_options(self) -> Result<AppOptions, ScrapeError> {
        let mut opts = config::load_or_default(self.config.as_deref())?;

        let scrape = &mut opts.scrape;
        if let Some(v) = self.url { scrape.url = v; }
        if let Some(v) = self.min_docs { scrape.min_documents = v; }
        if let Some(v) = self.max_retries { scrape.max_retries = v; }
        if let Some(v) = self.entity_types { scrape.entity_types = v; }
        if let Some(v) = self.short_sleep { scrape.timing.short_sleep_secs = v; }
        if let Some(v) = self.long_sleep { scrape.timing.long_sleep_secs = v; }
        if let Some(v) = self.timeout { scrape.timing.timeout_secs = v; }

        let browser = &mut opts.browser;
        if let Some(v) = self.headless { browser.headless = v; }
        if let Some(v) = self.geckodriver { browser.geckodriver = v; }
        if let Some(v) = self.webdriver_url { browser.webdriver_url = Some(v); }
        if let Some(v) = self.port { browser.port = v; }

        if let Some(v) = self.out { opts.export.set_out_dir(v); }
        if let Some(v) = self.format { opts.export.formats = v; }

        opts.validate()?;
        Ok(opts)
    }
}

/// Status lines on stderr; stdout is left for the written paths.
#[derive(Default)]
pub struct CliProgress {
    panels: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, panels: usize) {
        self.panels = panels;
        eprintln!("Found {panels} panels");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn page_done(&mut self, panel: usize, page: usize, calls: usize) {
        eprintln!("  panel {}/{} page {page}: {calls} calls", panel + 1, self.panels);
    }

    fn item_done(&mut self, panel: usize, calls: usize) {
        eprintln!("Panel {}/{} done ({calls} calls)", panel + 1, self.panels);
    }
}

pub async fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    crate::log::init(args.verbose)?;
    let opts = args.into_options()?;

    let mut progress = CliProgress::default();
    let summary = crate::runner::run(&opts, &mut progress).await?;

    eprintln!(
        "Collected {} calls / {} submissions",
        summary.calls, summary.submissions
    );
    for path in &summary.files_written {
        println!("{}", path.display());
    }
    Ok(())
}

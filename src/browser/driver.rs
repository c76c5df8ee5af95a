// src/browser/driver.rs
//
// Driver lifecycle: start geckodriver (unless a WebDriver URL is configured),
// then open a Firefox session against it.

use std::process::Stdio;
use std::time::Duration;

use thirtyfour::prelude::*;
use tokio::process::{Child, Command};
use tracing::{debug, info};

use super::WebDriverSession;
use crate::config::options::BrowserOptions;
use crate::core::RetryPolicy;
use crate::error::ScrapeError;
use crate::specs::SiteMap;

const CONNECT_ATTEMPTS: u32 = 10;
const CONNECT_DELAY: Duration = Duration::from_millis(500);

fn spawn_geckodriver(opts: &BrowserOptions) -> Result<Child, ScrapeError> {
    if !opts.geckodriver.exists() {
        return Err(ScrapeError::Driver(format!(
            "geckodriver not found at {} (set --geckodriver or --webdriver-url)",
            opts.geckodriver.display()
        )));
    }
    let child = Command::new(&opts.geckodriver)
        .arg("--port")
        .arg(opts.port.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ScrapeError::Driver(format!("failed to start {}: {e}", opts.geckodriver.display())))?;
    info!(path = %opts.geckodriver.display(), port = opts.port, "geckodriver started");
    Ok(child)
}

async fn connect(opts: &BrowserOptions) -> Result<WebDriver, ScrapeError> {
    let server = opts.server_url();
    let policy = RetryPolicy::new(CONNECT_ATTEMPTS, CONNECT_DELAY);
    let mut attempts = policy.start("webdriver connect");
    loop {
        let mut caps = DesiredCapabilities::firefox();
        if opts.headless {
            caps.set_headless()?;
        }
        match WebDriver::new(&server, caps).await {
            Ok(driver) => {
                info!(server = %server, headless = opts.headless, "browser session open");
                return Ok(driver);
            }
            Err(e) => {
                debug!(error = %e, "webdriver not ready");
                attempts.failed(e.into()).await?;
            }
        }
    }
}

/// Open a browser session ready for the scrape pipeline.
pub async fn launch(opts: &BrowserOptions, site: &SiteMap) -> Result<WebDriverSession, ScrapeError> {
    let child = match opts.webdriver_url {
        Some(_) => None,
        None => Some(spawn_geckodriver(opts)?),
    };
    // On error the child is dropped here and killed.
    let driver = connect(opts).await?;
    Ok(WebDriverSession::new(driver, site.clone(), opts.poll_interval(), child))
}

// src/browser/webdriver.rs
use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::prelude::*;
use tokio::process::Child;
use tracing::{debug, warn};

use super::Session;
use crate::error::ScrapeError;
use crate::specs::{Element, SiteMap};

/// A Firefox session driven over WebDriver.
/// Owns the geckodriver child when this crate started it.
pub struct WebDriverSession {
    driver: WebDriver,
    site: SiteMap,
    poll: Duration,
    geckodriver: Option<Child>,
    closed: bool,
}

impl WebDriverSession {
    pub fn new(driver: WebDriver, site: SiteMap, poll: Duration, geckodriver: Option<Child>) -> Self {
        Self { driver, site, poll, geckodriver, closed: false }
    }

    fn by(&self, element: Element) -> By {
        By::Css(self.site.selector(element).to_owned())
    }
}

#[async_trait]
impl Session for WebDriverSession {
    type Handle = WebElement;

    async fn goto(&mut self, url: &str) -> Result<(), ScrapeError> {
        debug!(url, "goto");
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String, ScrapeError> {
        Ok(self.driver.current_url().await?.to_string())
    }

    async fn source(&mut self) -> Result<String, ScrapeError> {
        Ok(self.driver.source().await?)
    }

    async fn find_all(&mut self, element: Element) -> Result<Vec<WebElement>, ScrapeError> {
        Ok(self.driver.find_all(self.by(element)).await?)
    }

    async fn click(&mut self, handle: &WebElement) -> Result<(), ScrapeError> {
        handle.click().await?;
        Ok(())
    }

    async fn wait_for(&mut self, element: Element, timeout: Duration) -> Result<(), ScrapeError> {
        match self
            .driver
            .query(self.by(element))
            .wait(timeout, self.poll)
            .first()
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                debug!(?element, error = %e, "wait failed");
                Err(ScrapeError::Timeout { what: format!("{element:?}"), secs: timeout.as_secs() })
            }
        }
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), ScrapeError> {
        self.driver
            .execute("window.scrollTo(0, document.body.scrollHeight);", Vec::new())
            .await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ScrapeError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let quit = self.driver.clone().quit().await;
        if let Some(mut child) = self.geckodriver.take() {
            if let Err(e) = child.kill().await {
                warn!(error = %e, "could not stop geckodriver");
            }
        }
        quit?;
        Ok(())
    }
}

// src/browser/mod.rs
//! The browser capability seam.
//!
//! The scrape pipeline only ever talks to a [`Session`]: navigate, read the
//! rendered source, find/click/wait on semantic [`Element`]s. The WebDriver
//! implementation lives in [`webdriver`]; tests drive the same pipeline with
//! an in-memory session serving fixture HTML.

pub mod driver;
pub mod webdriver;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScrapeError;
use crate::specs::Element;

pub use driver::launch;
pub use webdriver::WebDriverSession;

#[async_trait]
pub trait Session: Send {
    /// A live reference to one element on the current page.
    /// Invalidated by navigation; find again after every load.
    type Handle: Clone + Send + Sync;

    async fn goto(&mut self, url: &str) -> Result<(), ScrapeError>;

    async fn current_url(&mut self) -> Result<String, ScrapeError>;

    /// Rendered HTML of the current page.
    async fn source(&mut self) -> Result<String, ScrapeError>;

    /// All matches, in document order. Empty when nothing matches.
    async fn find_all(&mut self, element: Element) -> Result<Vec<Self::Handle>, ScrapeError>;

    async fn click(&mut self, handle: &Self::Handle) -> Result<(), ScrapeError>;

    /// Wait until `element` is present. `ScrapeError::Timeout` otherwise.
    async fn wait_for(&mut self, element: Element, timeout: Duration) -> Result<(), ScrapeError>;

    async fn scroll_to_bottom(&mut self) -> Result<(), ScrapeError>;

    /// End the browser session. Safe to call more than once.
    async fn close(&mut self) -> Result<(), ScrapeError>;

    /// First match or `ScrapeError::NotFound`.
    async fn find_first(&mut self, element: Element) -> Result<Self::Handle, ScrapeError> {
        self.find_all(element)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ScrapeError::NotFound(format!("{element:?}")))
    }
}

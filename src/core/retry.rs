// src/core/retry.rs
//! Bounded retry with a fixed delay.
//!
//! Every "try, wait, try again" loop in the scraper goes through here:
//!
//! ```ignore
//! let mut attempts = policy.start("portal load");
//! loop {
//!     match try_load(session).await {
//!         Ok(v) => break v,
//!         Err(e) => attempts.failed(e).await?,
//!     }
//! }
//! ```
//!
//! `failed` either sleeps and lets the loop go again, or returns the error
//! that ends it: the error itself when it is fatal, `Exhausted` when the
//! attempt budget is spent.

use std::time::Duration;

use tracing::warn;

use crate::error::ScrapeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), delay }
    }

    pub fn start<'a>(&self, what: &'a str) -> Attempts<'a> {
        Attempts {
            what,
            attempt: 1,
            max: self.max_attempts.max(1),
            delay: self.delay,
        }
    }
}

/// Cursor over one retry loop.
#[derive(Debug)]
pub struct Attempts<'a> {
    what: &'a str,
    attempt: u32,
    max: u32,
    delay: Duration,
}

impl Attempts<'_> {
    /// 1-based number of the attempt currently running.
    pub fn number(&self) -> u32 {
        self.attempt
    }

    pub fn is_retry(&self) -> bool {
        self.attempt > 1
    }

    /// Record a failed attempt.
    /// `Ok(())` means "sleep done, go again".
    pub async fn failed(&mut self, err: ScrapeError) -> Result<(), ScrapeError> {
        if err.is_fatal() {
            return Err(err);
        }
        if self.attempt >= self.max {
            return Err(ScrapeError::Exhausted {
                what: s!(self.what),
                attempts: self.attempt,
                last: Box::new(err),
            });
        }
        warn!(
            what = self.what,
            attempt = self.attempt,
            max = self.max,
            error = %err,
            "attempt failed, retrying"
        );
        tokio::time::sleep(self.delay).await;
        self.attempt += 1;
        Ok(())
    }
}

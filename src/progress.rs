// src/progress.rs
/// Lightweight progress reporting for the scrape run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called once the page has loaded, with the number of panels to visit.
    fn begin(&mut self, _panels: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One page of a panel's grid was parsed.
    fn page_done(&mut self, _panel: usize, _page: usize, _calls: usize) {}

    /// One panel was fully collected (all pages).
    fn item_done(&mut self, _panel: usize, _calls: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

// src/config/consts.rs

// Portal
pub const PORTAL_URL: &str = "https://www4.unfccc.int/sites/submissionsstaging/Pages/Home.aspx";
pub const PORTAL_BASE_PATH: &str = "/sites/submissionsstaging/Pages/Home.aspx";

// Entity types kept in the output. Sections with any other label are dropped.
pub const RELEVANT_ENTITY_TYPES: &[&str] = &[
    "IGO",
    "NAO",
    "NGO",
    "Elections Chairs and Coordinators",
    "Party",
    "UN",
    "Observer State",
];

// Load sanity check.
// The portal sometimes serves a partial document set; reloading helps.
// 486 was the full count observed on 07/06/2022. Override it when the portal grows.
pub const MIN_SUBMISSIONS_SANITY_CHECK: u32 = 486;

// Retry / timing (seconds)
pub const MAX_RETRIES: u32 = 3;
pub const CLICK_ATTEMPTS: u32 = 22;
pub const SHORT_SLEEP_SECS: u64 = 3;
pub const LONG_SLEEP_SECS: u64 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const POLL_INTERVAL_MS: u64 = 500;

// Browser
pub const HEADLESS: bool = false;
pub const GECKODRIVER_PATH: &str = "resources/geckodriver";
pub const WEBDRIVER_PORT: u16 = 4444;

// Export
pub const DEFAULT_OUT_DIR: &str = "data";
pub const DEFAULT_FILE_STEM: &str = "submissions_data";

// Local store (debug log lives here)
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// src/config/load.rs
//
// Optional TOML config file. Every table and key is optional; anything left
// out keeps its built-in default.
//
//   [browser]  headless, geckodriver, port, webdriver_url, poll_interval_ms
//   [scrape]   url, min_documents, max_retries, click_attempts, entity_types
//   [scrape.timing] short_sleep_secs, long_sleep_secs, timeout_secs
//   [export]   out_dir, file_stem, formats
//   [site]     selector overrides (see specs::portal::SiteMap)

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::options::AppOptions;
use crate::error::ScrapeError;

pub fn parse(text: &str) -> Result<AppOptions, ScrapeError> {
    Ok(toml::from_str(text)?)
}

pub fn load_file(path: &Path) -> Result<AppOptions, ScrapeError> {
    let text = fs::read_to_string(path)?;
    let opts = parse(&text)?;
    info!(path = %path.display(), "loaded config file");
    Ok(opts)
}

/// `path` if given (must exist), defaults otherwise.
pub fn load_or_default(path: Option<&Path>) -> Result<AppOptions, ScrapeError> {
    match path {
        Some(p) => load_file(p),
        None => {
            debug!("no config file, using defaults");
            Ok(AppOptions::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::ExportFormat;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(parse("").unwrap(), AppOptions::default());
    }

    #[test]
    fn nested_tables_override_selected_keys() {
        let opts = parse(
            r#"
            [browser]
            headless = true

            [scrape]
            min_documents = 10
            entity_types = ["Party"]

            [scrape.timing]
            long_sleep_secs = 1

            [export]
            formats = ["csv"]

            [site]
            clear_tags = "button.reset"
            "#,
        )
        .unwrap();

        assert!(opts.browser.headless);
        assert_eq!(opts.browser.port, 4444);
        assert_eq!(opts.scrape.min_documents, 10);
        assert_eq!(opts.scrape.entity_types, ["Party"]);
        assert_eq!(opts.scrape.timing.long_sleep_secs, 1);
        assert_eq!(opts.scrape.timing.short_sleep_secs, 3);
        assert_eq!(opts.export.formats, [ExportFormat::Csv]);
        assert_eq!(opts.site.clear_tags, "button.reset");
    }

    #[test]
    fn unknown_format_is_a_config_file_error() {
        let err = parse("[export]\nformats = [\"xlsx\"]").unwrap_err();
        assert!(matches!(err, ScrapeError::ConfigFile(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_or_default(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ScrapeError::Io(_)));
    }
}

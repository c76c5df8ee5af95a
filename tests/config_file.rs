// tests/config_file.rs
use std::fs;

use unfccc_scrape::config::{load_file, load_or_default};
use unfccc_scrape::config::options::{AppOptions, ExportFormat};

#[test]
fn file_overrides_only_what_it_names() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("scrape.toml");
    fs::write(
        &path,
        r#"
[browser]
webdriver_url = "http://127.0.0.1:9515"

[scrape]
url = "https://mirror.example/sites/submissionsstaging/Pages/Home.aspx"
max_retries = 5

[export]
out_dir = "exports"
formats = ["json"]

[site]
next_page = "a.pager-next"
"#,
    )
    .unwrap();

    let opts = load_file(&path).unwrap();
    assert_eq!(opts.browser.server_url(), "http://127.0.0.1:9515");
    assert_eq!(opts.scrape.max_retries, 5);
    assert_eq!(opts.scrape.load_policy().max_attempts, 6);
    assert_eq!(opts.scrape.min_documents, 486);
    assert_eq!(opts.export.path_for(ExportFormat::Json), std::path::Path::new("exports/submissions_data.json"));
    assert_eq!(opts.site.next_page, "a.pager-next");
    assert_eq!(opts.site.panel_toggle, AppOptions::default().site.panel_toggle);
    assert!(opts.validate().is_ok());
}

#[test]
fn no_file_means_defaults() {
    assert_eq!(load_or_default(None).unwrap(), AppOptions::default());
}

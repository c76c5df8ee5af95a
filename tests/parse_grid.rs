// tests/parse_grid.rs
use unfccc_scrape::config::options::ScrapeOptions;
use unfccc_scrape::specs::{Parser, SiteMap, is_complete};

const GRID: &str = include_str!("fixtures/grid.html");
const PAGE_URL: &str = "https://www4.unfccc.int/sites/submissionsstaging/Pages/Home.aspx";

fn parser() -> Parser {
    Parser::new(&SiteMap::default(), &ScrapeOptions::default().entity_types).unwrap()
}

#[test]
fn only_the_open_panel_is_parsed() {
    let calls = parser().parse_grid(GRID, PAGE_URL);
    let issues: Vec<_> = calls.iter().map(|c| c.issue.as_deref()).collect();
    assert_eq!(issues, [Some("Matters relating to finance"), Some("Adaptation")]);
}

#[test]
fn call_fields_are_read_and_missing_ones_are_none() {
    let calls = parser().parse_grid(GRID, PAGE_URL);
    let first = &calls[0];
    assert_eq!(first.deadline.as_deref(), Some("15 Feb 2024"));
    assert_eq!(first.title.as_deref(), Some("Views on the new collective quantified goal"));
    assert_eq!(first.mandate.as_deref(), Some("Decision 9/CMA.1, paragraph 7"));

    let second = &calls[1];
    assert_eq!(second.deadline, None);
    assert_eq!(second.mandate, None);
}

#[test]
fn sections_outside_allow_list_are_dropped() {
    let calls = parser().parse_grid(GRID, PAGE_URL);
    let labels: Vec<_> = calls[0].submissions.labels().collect();
    assert_eq!(labels, ["Party", "NGO", "UN"]);
    assert_eq!(calls[0].submissions.get("UN").unwrap().len(), 0);
    assert!(calls[0].submissions.get("Admitted Observer Organization").is_none());
    assert_eq!(calls[0].submissions.submission_count(), 3);
}

#[test]
fn submission_rows_keep_document_order_and_build_urls() {
    let calls = parser().parse_grid(GRID, PAGE_URL);
    let party = calls[0].submissions.get("Party").unwrap();

    assert_eq!(party[0].name.as_deref(), Some("Chile submission on NCQG"));
    assert_eq!(party[0].entity.as_deref(), Some("Chile"));
    assert_eq!(party[0].language.as_deref(), Some("English"));
    assert_eq!(party[0].date.as_deref(), Some("15/02/2024"));
    assert_eq!(
        party[0].url.as_deref(),
        Some("https://www4.unfccc.int/sites/submissionsstaging/Documents/202402151200---Chile.pdf")
    );

    assert_eq!(party[1].name.as_deref(), Some("Peru submission"));
    assert_eq!(party[1].language, None);
    assert_eq!(party[1].url, None);
}

#[test]
fn narrower_allow_list() {
    let parser = Parser::new(&SiteMap::default(), &["IGO".to_string()]).unwrap();
    let calls = parser.parse_grid(GRID, PAGE_URL);
    assert!(calls[0].submissions.is_empty());
    assert_eq!(calls[1].submissions.labels().collect::<Vec<_>>(), ["IGO"]);
}

#[test]
fn panel_counts_come_from_collapsed_titles() {
    let p = parser();
    let counts = p.panel_counts(GRID);
    assert_eq!(counts, [Some(1204)]);
    assert!(is_complete(&counts, 486));
    assert!(!is_complete(&counts, 2000));
}

#[test]
fn pager_is_detected() {
    let p = parser();
    assert!(p.has_next_page(GRID));
    assert!(!p.has_next_page("<html><body><a onclick=\"other()\">Prev</a></body></html>"));
}

#[test]
fn missing_json_fields_serialize_as_null() {
    let calls = parser().parse_grid(GRID, PAGE_URL);
    let v = serde_json::to_value(&calls[0]).unwrap();
    let peru = &v["submissions"]["Party"][1];
    assert!(peru["submission_language"].is_null());
    assert!(peru["submission_url"].is_null());
    assert_eq!(peru["submission_date"], "16/02/2024");
}

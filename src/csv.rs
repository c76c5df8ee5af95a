// src/csv.rs
//
// Flat CSV view of an envelope: one row per submission, with the call-level
// fields and the envelope metadata repeated on every row.

use std::io::Write;

use serde::Serialize;

use crate::data::Envelope;
use crate::error::ScrapeError;

pub const HEADERS: [&str; 12] = [
    "submission_name",
    "submission_entity",
    "submission_language",
    "submission_date",
    "submission_url",
    "entity_type",
    "issue",
    "issue_deadline",
    "issue_title",
    "issue_mandate",
    "data_source",
    "collected_at",
];

/// Field order must follow `HEADERS`. `None` is written as an empty cell.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct CsvRow<'a> {
    pub submission_name: Option<&'a str>,
    pub submission_entity: Option<&'a str>,
    pub submission_language: Option<&'a str>,
    pub submission_date: Option<&'a str>,
    pub submission_url: Option<&'a str>,
    pub entity_type: &'a str,
    pub issue: Option<&'a str>,
    pub issue_deadline: Option<&'a str>,
    pub issue_title: Option<&'a str>,
    pub issue_mandate: Option<&'a str>,
    pub data_source: &'a str,
    pub collected_at: &'a str,
}

/// Calls without submissions produce no rows.
pub fn flatten(envelope: &Envelope) -> Vec<CsvRow<'_>> {
    let mut rows = Vec::with_capacity(envelope.submission_count());
    for call in &envelope.records {
        for (entity_type, submissions) in call.submissions.iter() {
            for sub in submissions {
                rows.push(CsvRow {
                    submission_name: sub.name.as_deref(),
                    submission_entity: sub.entity.as_deref(),
                    submission_language: sub.language.as_deref(),
                    submission_date: sub.date.as_deref(),
                    submission_url: sub.url.as_deref(),
                    entity_type,
                    issue: call.issue.as_deref(),
                    issue_deadline: call.deadline.as_deref(),
                    issue_title: call.title.as_deref(),
                    issue_mandate: call.mandate.as_deref(),
                    data_source: &envelope.source,
                    collected_at: &envelope.collected_at,
                });
            }
        }
    }
    rows
}

/// Header row first (always, even with no data rows), then one row per submission.
pub fn write_rows<W: Write>(out: W, envelope: &Envelope) -> Result<usize, ScrapeError> {
    let mut w = ::csv::WriterBuilder::new().has_headers(false).from_writer(out);
    w.write_record(HEADERS)?;
    let rows = flatten(envelope);
    for row in &rows {
        w.serialize(row)?;
    }
    w.flush()?;
    Ok(rows.len())
}

pub fn to_csv_string(envelope: &Envelope) -> Result<String, ScrapeError> {
    let mut buf: Vec<u8> = Vec::new();
    write_rows(&mut buf, envelope)?;
    Ok(match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Buckets, Submission, SubmissionCall};

    fn envelope() -> Envelope {
        let mut subs = Buckets::new();
        subs.push_section(
            "Party",
            vec![
                Submission { name: Some(s!("a.pdf")), entity: Some(s!("Chile")), ..Default::default() },
                Submission { name: Some(s!("b.pdf")), entity: Some(s!("Peru, Republic of")), ..Default::default() },
            ],
        );
        let call = SubmissionCall {
            issue: Some(s!("Loss and damage")),
            title: Some(s!("Views on \"finance\"")),
            submissions: subs,
            ..Default::default()
        };
        let empty = SubmissionCall { issue: Some(s!("Nothing filed")), ..Default::default() };
        Envelope::with_timestamp("https://portal", "01-01-2024 00:00:00", vec![call, empty])
    }

    #[test]
    fn one_row_per_submission() {
        let env = envelope();
        let rows = flatten(&env);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].issue, rows[1].issue);
        assert_eq!(rows[0].issue_title, Some("Views on \"finance\""));
        assert_ne!(rows[0].submission_name, rows[1].submission_name);
        assert_eq!(rows[1].entity_type, "Party");
    }

    #[test]
    fn header_and_quoting() {
        let text = to_csv_string(&envelope()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), HEADERS.join(","));
        let second = lines.nth(1).unwrap();
        assert!(second.starts_with("b.pdf,\"Peru, Republic of\",,,,Party,Loss and damage,,"));
        assert!(second.contains("\"Views on \"\"finance\"\"\""));
        assert!(second.ends_with("https://portal,01-01-2024 00:00:00"));
    }

    #[test]
    fn empty_envelope_still_has_header() {
        let env = Envelope::with_timestamp("src", "t", vec![]);
        assert_eq!(to_csv_string(&env).unwrap(), join!(&HEADERS.join(","), "\n"));
    }
}

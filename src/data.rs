// src/data.rs
//
// Output records.
//
// - SubmissionCall: one call for submissions (issue, deadline, title, mandate)
//                   plus its submissions grouped by entity type.
// - Submission:     one filed document.
// - Envelope:       what lands in the JSON file (source, timestamp, records).
//
// Text fields are Option<String>: None means the DOM node was missing.
// Field names on disk follow the portal's historical export format.

use chrono::Local;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub const COLLECTED_AT_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Submission {
    #[serde(rename = "submission_name")]
    pub name: Option<String>,
    #[serde(rename = "submission_entity")]
    pub entity: Option<String>,
    #[serde(rename = "submission_language")]
    pub language: Option<String>,
    #[serde(rename = "submission_date")]
    pub date: Option<String>,
    #[serde(rename = "submission_url")]
    pub url: Option<String>,
}

/// Entity type → submissions, in the order sections appear on the page.
/// Serialized as a JSON object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buckets(Vec<(String, Vec<Submission>)>);

impl Buckets {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a section's submissions. A label seen before keeps its position
    /// and gets the new rows appended.
    pub fn push_section(&mut self, label: &str, submissions: Vec<Submission>) {
        match self.0.iter_mut().find(|(l, _)| l == label) {
            Some((_, existing)) => existing.extend(submissions),
            None => self.0.push((s!(label), submissions)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&[Submission]> {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, subs)| subs.as_slice())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Submission])> {
        self.0.iter().map(|(l, subs)| (l.as_str(), subs.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total submissions across all entity types.
    pub fn submission_count(&self) -> usize {
        self.0.iter().map(|(_, subs)| subs.len()).sum()
    }
}

impl Serialize for Buckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, subs) in &self.0 {
            map.serialize_entry(label, subs)?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionCall {
    pub issue: Option<String>,
    pub deadline: Option<String>,
    pub title: Option<String>,
    pub mandate: Option<String>,
    pub submissions: Buckets,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Envelope {
    #[serde(rename = "data_source")]
    pub source: String,
    pub collected_at: String,
    #[serde(rename = "submissions_data")]
    pub records: Vec<SubmissionCall>,
}

impl Envelope {
    /// Stamp `records` with the current local time.
    pub fn new(source: impl Into<String>, records: Vec<SubmissionCall>) -> Self {
        let collected_at = Local::now().format(COLLECTED_AT_FORMAT).to_string();
        Self::with_timestamp(source, collected_at, records)
    }

    pub fn with_timestamp(
        source: impl Into<String>,
        collected_at: impl Into<String>,
        records: Vec<SubmissionCall>,
    ) -> Self {
        Self { source: source.into(), collected_at: collected_at.into(), records }
    }

    pub fn submission_count(&self) -> usize {
        self.records.iter().map(|c| c.submissions.submission_count()).sum()
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used by the export format, e.g. `20231021T100502Z`.
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// A single note as produced by the export decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub source_url: String,
    pub created: String,
    pub content: String,
}

impl Note {
    pub fn new(title: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source_url: source_url.into(),
            ..Default::default()
        }
    }

    pub fn with_created(mut self, created: impl Into<String>) -> Self {
        self.created = created.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Creation date rendered as `YYYY-MM-DD`, or `None` when the timestamp
    /// does not match the export layout.
    pub fn saved_at(&self) -> Option<String> {
        NaiveDateTime::parse_from_str(self.created.trim(), EXPORT_TIMESTAMP_FORMAT)
            .ok()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
    }
}

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How a note is sent to the read-it-later service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublishMode {
    /// Upload the captured note content.
    Article,
    /// Submit the link only; the service fetches the page itself.
    Url,
}

/// Why a note was not processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Listed in the explicit skip set.
    SkipList,
    /// Already present in the dedup cache.
    Cache,
    /// Decoded before (or equal to) the resume marker.
    BeforeResumeMarker,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SkipList => write!(f, "skip list"),
            SkipReason::Cache => write!(f, "cache"),
            SkipReason::BeforeResumeMarker => write!(f, "before resume marker"),
        }
    }
}

/// Per-identifier outcome of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub id: String,
    pub url: String,
    pub processed: bool,
    pub still_online: bool,
    pub processed_as_article: bool,
    pub processed_as_url: bool,
    pub saved_as_article_successful: bool,
    pub saved_as_url_successful: bool,
    pub skip_reason: Option<SkipReason>,
}

impl ProcessingResult {
    pub fn processed(id: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            url: url.to_string(),
            processed: true,
            ..Default::default()
        }
    }

    pub fn skipped(id: &str, url: &str, reason: SkipReason) -> Self {
        Self {
            id: id.to_string(),
            url: url.to_string(),
            skip_reason: Some(reason),
            ..Default::default()
        }
    }

    pub fn published(&self) -> bool {
        self.saved_as_article_successful || self.saved_as_url_successful
    }
}

/// End-of-run tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub processed_as_url: usize,
    pub processed_as_article: usize,
    pub url_errors: usize,
    pub article_errors: usize,
    pub skipped: usize,
    pub published: usize,
}

impl RunSummary {
    pub fn from_results(results: &HashMap<String, ProcessingResult>, published: usize) -> Self {
        let mut summary = RunSummary {
            published,
            ..Default::default()
        };

        for result in results.values() {
            if !result.processed {
                summary.skipped += 1;
                continue;
            }
            summary.processed += 1;

            if result.processed_as_url {
                summary.processed_as_url += 1;
                if !result.saved_as_url_successful {
                    summary.url_errors += 1;
                }
            }

            if result.processed_as_article {
                summary.processed_as_article += 1;
                if !result.saved_as_article_successful {
                    summary.article_errors += 1;
                }
            }
        }

        summary
    }

    pub fn has_errors(&self) -> bool {
        self.url_errors + self.article_errors > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===================================================")?;
        writeln!(f, "Total number of items processed : {}", self.processed)?;
        writeln!(f, "Total number of items processed as URL : {}", self.processed_as_url)?;
        writeln!(
            f,
            "Total number of items processed as Article : {}",
            self.processed_as_article
        )?;
        writeln!(f, "Total number of errors while saving as URL : {}", self.url_errors)?;
        writeln!(
            f,
            "Total number of errors while saving as Article : {}",
            self.article_errors
        )?;
        writeln!(f, "Total number of items skipped : {}", self.skipped)?;
        write!(f, "Total number of items published : {}", self.published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(entries: Vec<ProcessingResult>) -> HashMap<String, ProcessingResult> {
        entries.into_iter().map(|r| (r.id.clone(), r)).collect()
    }

    #[test]
    fn test_summary_counts_modes_and_errors() {
        let mut as_url = ProcessingResult::processed("a", "https://a.example");
        as_url.processed_as_url = true;
        as_url.saved_as_url_successful = true;

        let mut failed_article = ProcessingResult::processed("b", "https://b.example");
        failed_article.processed_as_article = true;

        let skipped = ProcessingResult::skipped("c", "https://c.example", SkipReason::Cache);

        let summary = RunSummary::from_results(&results(vec![as_url, failed_article, skipped]), 1);

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.processed_as_url, 1);
        assert_eq!(summary.processed_as_article, 1);
        assert_eq!(summary.url_errors, 0);
        assert_eq!(summary.article_errors, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.published, 1);
        assert!(summary.has_errors());
    }

    #[test]
    fn test_processed_without_publish_is_not_an_error() {
        // Preview runs classify but never set a mode flag.
        let summary = RunSummary::from_results(
            &results(vec![ProcessingResult::processed("a", "https://a.example")]),
            0,
        );
        assert_eq!(summary.processed, 1);
        assert!(!summary.has_errors());
    }

    #[test]
    fn test_published_flag() {
        let mut r = ProcessingResult::processed("a", "u");
        assert!(!r.published());
        r.saved_as_article_successful = true;
        assert!(r.published());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::Cache.to_string(), "cache");
        assert_eq!(SkipReason::SkipList.to_string(), "skip list");
    }

    #[test]
    fn test_summary_display_lines() {
        let text = RunSummary::default().to_string();
        assert!(text.contains("Total number of items processed : 0"));
        assert!(text.contains("Total number of errors while saving as Article : 0"));
    }
}

use regex::Regex;

use crate::app::Result;

/// Tracking-suffix patterns, applied in order. Each one truncates from its
/// match point to the end of the URL.
pub const TRACKING_PATTERNS: &[&str] = &[
    r"[\?;]utm_source.*$",
    r"[\?;&]utm_campaign.*$",
    r"[\?;&]mkt_tok.*$",
    r"[\?;&]utm_medium.*$",
    r"[\?;&]utm_term.*$",
    r"[\?;&]ul_campaign.*$",
    r"[\?;&]ul_source.*$",
    r"\?%24deep_link.*$",
    r"\?idg_eid.*$",
    r"\?source=.*$",
];

/// Applied after every other pattern, including configured extras.
///
/// Strips any run of trailing `?`, not just one, so normalizing twice gives
/// the same result. A URL ending in `??` therefore maps to a different
/// identifier than a single-`?` strip would give.
pub const TRAILING_QUERY_PATTERN: &str = r"\?+$";

#[derive(Debug, Clone)]
pub struct UrlNormalizer {
    patterns: Vec<Regex>,
}

impl UrlNormalizer {
    pub fn new() -> Result<Self> {
        Self::with_extra_patterns(&[])
    }

    /// Built-in patterns, then `extra`, then [`TRAILING_QUERY_PATTERN`].
    pub fn with_extra_patterns(extra: &[String]) -> Result<Self> {
        let patterns = TRACKING_PATTERNS
            .iter()
            .copied()
            .chain(extra.iter().map(String::as_str))
            .chain(std::iter::once(TRAILING_QUERY_PATTERN))
            .map(Regex::new)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    pub fn normalize(&self, url: &str) -> String {
        let mut url = url.trim().to_string();
        for pattern in &self.patterns {
            if let Some(m) = pattern.find(&url) {
                url.truncate(m.start());
            }
        }
        url
    }
}

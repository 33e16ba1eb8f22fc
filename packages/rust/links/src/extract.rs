//! Candidate extraction from free-form text.
//!
//! Scans raw tracker text for absolute `http(s)` links and tracker-key tokens.
//! Pure and total: malformed input yields empty sets, never errors.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Absolute links: scheme prefix up to whitespace or enclosing punctuation.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bhttps?://[^\s<>"')]+"#).expect("valid url regex"));

/// Tracker keys like `ABC-123`: uppercase project prefix, hyphen, digits.
static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][A-Z0-9]+-\d+\b").expect("valid key regex"));

/// Candidate references found in a block of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    /// Absolute URLs, deduplicated, in order of first appearance.
    pub urls: Vec<String>,
    /// Tracker-key tokens, deduplicated, in order of first appearance.
    pub keys: Vec<String>,
}

/// Extract candidate URLs and tracker keys from `text`.
pub fn extract_candidates(text: &str) -> Candidates {
    Candidates {
        urls: extract_urls(text),
        keys: extract_keys(text),
    }
}

/// Extract absolute `http(s)` URLs, stripping trailing punctuation runs
/// (`.`, `,`, `;`, `:`, `)`, `]`) that are not part of the link.
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for m in URL_RE.find_iter(text) {
        let url = m.as_str().trim_end_matches(['.', ',', ';', ':', ')', ']']);
        if !url.is_empty() && seen.insert(url.to_string()) {
            urls.push(url.to_string());
        }
    }

    urls
}

/// Extract tracker-key tokens (e.g. `ABC-123`).
pub fn extract_keys(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    for m in KEY_RE.find_iter(text) {
        if seen.insert(m.as_str().to_string()) {
            keys.push(m.as_str().to_string());
        }
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_urls_in_first_seen_order() {
        let text = "See https://b.example.com/two and https://a.example.com/one here";
        let urls = extract_urls(text);
        assert_eq!(
            urls,
            vec![
                "https://b.example.com/two".to_string(),
                "https://a.example.com/one".to_string(),
            ]
        );
    }

    #[test]
    fn deduplicates_repeated_urls() {
        let text = "https://example.com/x then again https://example.com/x";
        assert_eq!(extract_urls(text), vec!["https://example.com/x".to_string()]);
    }

    #[test]
    fn strips_trailing_punctuation() {
        let text = "(see https://example.com/page). Also https://example.com/a;,";
        let urls = extract_urls(text);
        assert_eq!(
            urls,
            vec![
                "https://example.com/page".to_string(),
                "https://example.com/a".to_string(),
            ]
        );
    }

    #[test]
    fn stops_at_enclosing_punctuation() {
        let text = r#"<https://example.com/angle> "https://example.com/quote""#;
        let urls = extract_urls(text);
        assert_eq!(
            urls,
            vec![
                "https://example.com/angle".to_string(),
                "https://example.com/quote".to_string(),
            ]
        );
    }

    #[test]
    fn extracts_tracker_keys() {
        let text = "Relates to ABC-123 and RFW2-9, not abc-1 or A-2 or X9.";
        assert_eq!(
            extract_keys(text),
            vec!["ABC-123".to_string(), "RFW2-9".to_string()]
        );
    }

    #[test]
    fn empty_input_yields_empty_sets() {
        let c = extract_candidates("");
        assert!(c.urls.is_empty());
        assert!(c.keys.is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "ABC-1 fix https://github.com/acme/widgets/pull/42, ABC-1 again";
        let first = extract_candidates(text);
        let second = extract_candidates(text);
        assert_eq!(first, second);
    }
}

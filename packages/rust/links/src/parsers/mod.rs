//! Provider parsers for classifying candidate URLs.
//!
//! Each parser recognizes one provider's URL shape and emits a typed
//! [`ArtifactReference`], or rejects the candidate. Parsers are tried in a
//! fixed order; a candidate no parser accepts is simply unrecognized.

mod confluence;
mod figma;
mod github;

use traceboard_shared::ArtifactReference;
use url::Url;

pub use confluence::ConfluencePageParser;
pub use figma::FigmaDesignParser;
pub use github::GithubPullParser;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Trait for provider-specific URL recognition.
///
/// `raw` is the candidate exactly as it appeared in the text; references carry
/// it unmodified so report links match the source.
pub trait RefParser: Send + Sync {
    /// Try to parse the candidate. `None` means "not this provider" — a
    /// partial match (missing required fields) is also `None`, never a
    /// degraded reference.
    fn attempt(&self, url: &Url, raw: &str) -> Option<ArtifactReference>;

    /// Human-readable parser name for tracing.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Holds the provider parsers in their fixed classification order.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn RefParser>>,
}

impl ParserRegistry {
    /// Create a registry with the built-in parsers: design tool first, then
    /// code host, then documentation wiki.
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(FigmaDesignParser),
                Box::new(GithubPullParser),
                Box::new(ConfluencePageParser),
            ],
        }
    }

    /// Classify a candidate URL string. Malformed URLs are unrecognized,
    /// never errors.
    pub fn classify(&self, raw: &str) -> Option<ArtifactReference> {
        let url = Url::parse(raw).ok()?;
        self.parsers.iter().find_map(|p| p.attempt(&url, raw))
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect the non-empty path segments of a URL.
pub(crate) fn path_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default()
}

//! Documentation wiki (Confluence) URL parser.

use traceboard_shared::{ArtifactReference, DocRef};
use url::Url;

use super::{RefParser, path_segments};

/// Recognizes Confluence page URLs in the common cloud formats:
/// - `https://<site>.atlassian.net/wiki/spaces/<SPACE>/pages/<pageId>/...`
/// - `https://<site>.atlassian.net/wiki/pages/<pageId>/...`
///
/// The path must contain a `wiki` segment and an integer page id directly
/// after the `pages` segment.
pub struct ConfluencePageParser;

impl RefParser for ConfluencePageParser {
    fn attempt(&self, url: &Url, raw: &str) -> Option<ArtifactReference> {
        let parts = path_segments(url);
        if !parts.contains(&"wiki") {
            return None;
        }

        let pages_idx = parts.iter().position(|p| *p == "pages")?;
        let page_id: u64 = parts.get(pages_idx + 1)?.parse().ok()?;

        Some(ArtifactReference::Doc(DocRef {
            page_id,
            url: raw.to_string(),
        }))
    }

    fn name(&self) -> &str {
        "confluence"
    }
}

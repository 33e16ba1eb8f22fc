//! Design tool (Figma) URL parser.

use traceboard_shared::{ArtifactReference, DesignRef};
use url::Url;

use super::{RefParser, path_segments};

/// Recognizes Figma design-file URLs of the form
/// `https://www.figma.com/design/<fileKey>/<name>?node-id=62-31062`.
///
/// Both the file key and the node id are required; a design URL missing
/// either is rejected entirely.
pub struct FigmaDesignParser;

impl RefParser for FigmaDesignParser {
    fn attempt(&self, url: &Url, raw: &str) -> Option<ArtifactReference> {
        let host = url.host_str()?;
        if host != "www.figma.com" && host != "figma.com" {
            return None;
        }

        let parts = path_segments(url);
        if parts.first() != Some(&"design") {
            return None;
        }
        let file_key = parts.get(1)?;

        // "62-31062" in the share URL is node "62:31062" in the API.
        let node_id = url
            .query_pairs()
            .find(|(k, _)| k == "node-id")
            .map(|(_, v)| v.replacen('-', ":", 1))?;
        if node_id.is_empty() {
            return None;
        }

        Some(ArtifactReference::Design(DesignRef {
            file_key: (*file_key).to_string(),
            node_id,
            url: raw.to_string(),
        }))
    }

    fn name(&self) -> &str {
        "figma"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(raw: &str) -> Option<ArtifactReference> {
        FigmaDesignParser.attempt(&Url::parse(raw).unwrap(), raw)
    }

    #[test]
    fn parses_design_url_with_node_id() {
        let raw = "https://www.figma.com/design/FK1/Checkout?node-id=62-31062&m=dev";
        match attempt(raw) {
            Some(ArtifactReference::Design(d)) => {
                assert_eq!(d.file_key, "FK1");
                assert_eq!(d.node_id, "62:31062");
                assert_eq!(d.url, raw);
            }
            other => panic!("expected design ref, got {other:?}"),
        }
    }

    #[test]
    fn accepts_bare_host() {
        let raw = "https://figma.com/design/FK1/Name?node-id=1-2";
        assert!(attempt(raw).is_some());
    }

    #[test]
    fn rejects_missing_node_id() {
        // Partial matches are dropped, not kept as degraded references.
        assert!(attempt("https://www.figma.com/design/ABC123/Name").is_none());
    }

    #[test]
    fn rejects_non_design_paths() {
        assert!(attempt("https://www.figma.com/files/recent?node-id=1-2").is_none());
    }

    #[test]
    fn rejects_other_hosts() {
        assert!(attempt("https://example.com/design/FK1/Name?node-id=1-2").is_none());
    }
}

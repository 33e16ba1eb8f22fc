//! Core domain types for traceboard correlation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// WorkItem
// ---------------------------------------------------------------------------

/// A tracked unit of work pulled from the issue tracker.
///
/// Read-only within the core; missing tracker fields default to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Tracker key, e.g. `ABC-123`.
    pub key: String,
    /// One-line summary text.
    pub summary: String,
    /// Free-form description text.
    pub description: String,
    /// Workflow status name.
    pub status: String,
}

// ---------------------------------------------------------------------------
// Artifact references
// ---------------------------------------------------------------------------

/// A reference to a design file node (e.g. a Figma frame).
///
/// Only constructed when both the file key and node id parsed successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignRef {
    pub file_key: String,
    /// Normalized node id, e.g. `62:31062`.
    pub node_id: String,
    /// The original URL as it appeared in the text.
    pub url: String,
}

/// A reference to a code change (e.g. a GitHub pull request).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeChangeRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub url: String,
}

/// A reference to a documentation wiki page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRef {
    pub page_id: u64,
    pub url: String,
}

/// A typed artifact reference recovered from free-form text.
///
/// Partially-matched URLs are discarded by the classifier, never retained as
/// a degraded variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtifactReference {
    Design(DesignRef),
    Code(CodeChangeRef),
    Doc(DocRef),
}

impl ArtifactReference {
    /// The URL the reference was recovered from.
    pub fn url(&self) -> &str {
        match self {
            Self::Design(d) => &d.url,
            Self::Code(c) => &c.url,
            Self::Doc(d) => &d.url,
        }
    }
}

// ---------------------------------------------------------------------------
// CorrelationRow
// ---------------------------------------------------------------------------

/// The per-item aggregation of all recovered references, keyed by kind.
///
/// One row per work item, preserving input order. Per-kind lists preserve
/// first-seen order within the item's text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationRow {
    pub item: WorkItem,
    pub design: Vec<DesignRef>,
    pub code: Vec<CodeChangeRef>,
    pub docs: Vec<DocRef>,
    /// Tracker-key tokens found in the item's text. Kept for cross-reference
    /// use (e.g. self-reference detection); not part of orphan computation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracker_keys: Vec<String>,
}

impl CorrelationRow {
    /// A row with no recovered references.
    pub fn empty(item: WorkItem) -> Self {
        Self {
            item,
            design: Vec::new(),
            code: Vec::new(),
            docs: Vec::new(),
            tracker_keys: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// OrphanSets
// ---------------------------------------------------------------------------

/// Work-item keys missing a reference of a given kind.
///
/// Derived from the current row list, never mutated directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanSets {
    pub no_design: Vec<String>,
    pub no_code: Vec<String>,
    pub no_docs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_reference_url_accessor() {
        let r = ArtifactReference::Code(CodeChangeRef {
            owner: "acme".into(),
            repo: "widgets".into(),
            number: 42,
            url: "https://github.com/acme/widgets/pull/42".into(),
        });
        assert_eq!(r.url(), "https://github.com/acme/widgets/pull/42");
    }

    #[test]
    fn reference_serialization_is_tagged() {
        let r = ArtifactReference::Doc(DocRef {
            page_id: 123456,
            url: "https://team.example.com/wiki/pages/123456/Title".into(),
        });
        let json = serde_json::to_string(&r).expect("serialize");
        assert!(json.contains(r#""kind":"doc""#));
        let parsed: ArtifactReference = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, r);
    }

    #[test]
    fn correlation_row_roundtrip() {
        let row = CorrelationRow {
            item: WorkItem {
                key: "ABC-1".into(),
                summary: "Ship the widget".into(),
                description: String::new(),
                status: "In Progress".into(),
            },
            design: vec![DesignRef {
                file_key: "FK1".into(),
                node_id: "1:2".into(),
                url: "https://www.figma.com/design/FK1/Name?node-id=1-2".into(),
            }],
            code: vec![],
            docs: vec![],
            tracker_keys: vec!["ABC-1".into()],
        };
        let json = serde_json::to_string(&row).expect("serialize");
        let parsed: CorrelationRow = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.item.key, "ABC-1");
        assert_eq!(parsed.design.len(), 1);
        assert_eq!(parsed.tracker_keys, vec!["ABC-1".to_string()]);
    }
}

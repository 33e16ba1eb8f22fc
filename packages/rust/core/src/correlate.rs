//! Correlation engine: work items → correlation rows → orphan sets.

use traceboard_links::{ParserRegistry, extract_candidates};
use traceboard_shared::{ArtifactReference, CorrelationRow, OrphanSets, WorkItem};

/// Build one correlation row per work item, preserving input order.
///
/// For each item, candidates are extracted from the concatenated summary and
/// description, every URL candidate is classified, and successes are
/// partitioned into the per-kind lists in first-seen order.
pub fn correlate(items: &[WorkItem]) -> Vec<CorrelationRow> {
    let registry = ParserRegistry::new();
    items
        .iter()
        .map(|item| correlate_item(&registry, item))
        .collect()
}

fn correlate_item(registry: &ParserRegistry, item: &WorkItem) -> CorrelationRow {
    let text = format!("{}\n{}", item.summary, item.description);
    let candidates = extract_candidates(&text);

    let mut row = CorrelationRow::empty(item.clone());
    row.tracker_keys = candidates.keys;

    for url in &candidates.urls {
        match registry.classify(url) {
            Some(ArtifactReference::Design(d)) => row.design.push(d),
            Some(ArtifactReference::Code(c)) => row.code.push(c),
            Some(ArtifactReference::Doc(d)) => row.docs.push(d),
            None => {}
        }
    }

    row
}

/// Derive the orphan sets from the current rows.
///
/// Always recomputed from the row list; never cached across mutations.
pub fn orphans(rows: &[CorrelationRow]) -> OrphanSets {
    let mut sets = OrphanSets::default();
    for row in rows {
        if row.design.is_empty() {
            sets.no_design.push(row.item.key.clone());
        }
        if row.code.is_empty() {
            sets.no_code.push(row.item.key.clone());
        }
        if row.docs.is_empty() {
            sets.no_docs.push(row.item.key.clone());
        }
    }
    sets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(key: &str, summary: &str, description: &str) -> WorkItem {
        WorkItem {
            key: key.into(),
            summary: summary.into(),
            description: description.into(),
            status: "In Progress".into(),
        }
    }

    #[test]
    fn partitions_references_by_kind() {
        let items = vec![item(
            "ABC-1",
            "Implements https://github.com/acme/widgets/pull/42",
            "Design: https://www.figma.com/design/FK1/Name?node-id=1-2\n\
             Spec: https://team.atlassian.net/wiki/spaces/ENG/pages/123456/Spec",
        )];

        let rows = correlate(&items);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code.len(), 1);
        assert_eq!(rows[0].code[0].number, 42);
        assert_eq!(rows[0].design.len(), 1);
        assert_eq!(rows[0].design[0].node_id, "1:2");
        assert_eq!(rows[0].docs.len(), 1);
        assert_eq!(rows[0].docs[0].page_id, 123456);
    }

    #[test]
    fn rows_preserve_input_order() {
        let items = vec![item("B-2", "", ""), item("A-1", "", "")];
        let rows = correlate(&items);
        assert_eq!(rows[0].item.key, "B-2");
        assert_eq!(rows[1].item.key, "A-1");
    }

    #[test]
    fn tracker_keys_kept_but_not_classified() {
        let items = vec![item("ABC-1", "Relates to ABC-2 and DEF-3", "")];
        let rows = correlate(&items);
        assert_eq!(
            rows[0].tracker_keys,
            vec!["ABC-2".to_string(), "DEF-3".to_string()]
        );
        assert!(rows[0].design.is_empty());
        assert!(rows[0].code.is_empty());
        assert!(rows[0].docs.is_empty());
    }

    #[test]
    fn partial_design_match_is_dropped() {
        let items = vec![item(
            "ABC-1",
            "See https://www.figma.com/design/ABC123/Name",
            "",
        )];
        let rows = correlate(&items);
        assert!(rows[0].design.is_empty());
    }

    #[test]
    fn orphan_membership_matches_empty_kinds() {
        let items = vec![
            item("ABC-1", "https://github.com/acme/widgets/pull/42", ""),
            item("ABC-2", "", ""),
        ];
        let rows = correlate(&items);
        let sets = orphans(&rows);

        // Complement property: key is in the orphan list iff the kind is empty.
        for row in &rows {
            assert_eq!(
                row.design.is_empty(),
                sets.no_design.contains(&row.item.key)
            );
            assert_eq!(row.code.is_empty(), sets.no_code.contains(&row.item.key));
            assert_eq!(row.docs.is_empty(), sets.no_docs.contains(&row.item.key));
        }

        assert_eq!(sets.no_code, vec!["ABC-2".to_string()]);
        assert_eq!(
            sets.no_design,
            vec!["ABC-1".to_string(), "ABC-2".to_string()]
        );
    }

    #[test]
    fn orphans_recompute_after_row_changes() {
        let items = vec![item("ABC-1", "", "")];
        let mut rows = correlate(&items);
        assert_eq!(orphans(&rows).no_code, vec!["ABC-1".to_string()]);

        rows[0].code.push(traceboard_shared::CodeChangeRef {
            owner: "acme".into(),
            repo: "widgets".into(),
            number: 7,
            url: "https://github.com/acme/widgets/pull/7".into(),
        });
        assert!(orphans(&rows).no_code.is_empty());
    }
}

//! Graph builder: correlation rows → deduplicated nodes and directed edges.

use traceboard_shared::CorrelationRow;

/// A graph node with a sanitized, identifier-safe id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

/// A directed, labeled edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub label: String,
}

/// The derived node/edge set for a batch of rows.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Derive the traceability graph from correlation rows.
///
/// Nodes are deduplicated by id across the whole batch, keeping first-seen
/// order; the same artifact referenced from two items contributes one node
/// and two edges. Edges are not deduplicated.
pub fn build_graph(rows: &[CorrelationRow]) -> Graph {
    let mut graph = Graph::default();

    for row in rows {
        let item_id = node_id("jira", &row.item.key);
        push_node(
            &mut graph,
            GraphNode {
                id: item_id.clone(),
                label: format!("{}: {}", row.item.key, row.item.summary),
            },
        );

        for design in &row.design {
            let id = node_id("figma", &format!("{}_{}", design.file_key, design.node_id));
            push_node(
                &mut graph,
                GraphNode {
                    id: id.clone(),
                    label: format!("Figma {}", design.node_id),
                },
            );
            graph.edges.push(GraphEdge {
                from: id,
                to: item_id.clone(),
                label: "design".into(),
            });
        }

        for code in &row.code {
            let id = node_id(
                "pr",
                &format!("{}_{}_{}", code.owner, code.repo, code.number),
            );
            push_node(
                &mut graph,
                GraphNode {
                    id: id.clone(),
                    label: format!("PR #{} ({}/{})", code.number, code.owner, code.repo),
                },
            );
            graph.edges.push(GraphEdge {
                from: item_id.clone(),
                to: id,
                label: "implements".into(),
            });
        }

        for doc in &row.docs {
            let id = node_id("conf", &doc.page_id.to_string());
            push_node(
                &mut graph,
                GraphNode {
                    id: id.clone(),
                    label: format!("Confluence {}", doc.page_id),
                },
            );
            graph.edges.push(GraphEdge {
                from: item_id.clone(),
                to: id,
                label: "docs".into(),
            });
        }
    }

    graph
}

fn push_node(graph: &mut Graph, node: GraphNode) {
    if !graph.nodes.iter().any(|n| n.id == node.id) {
        graph.nodes.push(node);
    }
}

/// Total identifier derivation: `prefix_` plus the identity string with
/// everything outside `[A-Za-z0-9_]` replaced by `_`. Distinct identities
/// that sanitize to the same id are an accepted risk.
pub fn node_id(prefix: &str, raw: &str) -> String {
    let sanitized: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("{prefix}_{sanitized}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use traceboard_shared::{CodeChangeRef, CorrelationRow, DesignRef, WorkItem};

    fn row(key: &str) -> CorrelationRow {
        CorrelationRow::empty(WorkItem {
            key: key.into(),
            summary: format!("Summary for {key}"),
            ..Default::default()
        })
    }

    fn pr42() -> CodeChangeRef {
        CodeChangeRef {
            owner: "acme".into(),
            repo: "widgets".into(),
            number: 42,
            url: "https://github.com/acme/widgets/pull/42".into(),
        }
    }

    #[test]
    fn sanitizes_node_ids() {
        assert_eq!(node_id("jira", "ABC-1"), "jira_ABC_1");
        assert_eq!(node_id("figma", "FK1_62:31062"), "figma_FK1_62_31062");
        assert_eq!(node_id("pr", "acme_widgets_42"), "pr_acme_widgets_42");
    }

    #[test]
    fn shared_artifact_yields_one_node_two_edges() {
        let mut a = row("ABC-1");
        a.code.push(pr42());
        let mut b = row("ABC-2");
        b.code.push(pr42());

        let graph = build_graph(&[a, b]);

        let pr_nodes: Vec<_> = graph
            .nodes
            .iter()
            .filter(|n| n.id == "pr_acme_widgets_42")
            .collect();
        assert_eq!(pr_nodes.len(), 1);

        let implements: Vec<_> = graph
            .edges
            .iter()
            .filter(|e| e.label == "implements" && e.to == "pr_acme_widgets_42")
            .collect();
        assert_eq!(implements.len(), 2);
        assert_eq!(implements[0].from, "jira_ABC_1");
        assert_eq!(implements[1].from, "jira_ABC_2");
    }

    #[test]
    fn design_edges_point_at_the_item() {
        let mut a = row("ABC-1");
        a.design.push(DesignRef {
            file_key: "FK1".into(),
            node_id: "1:2".into(),
            url: "https://www.figma.com/design/FK1/Name?node-id=1-2".into(),
        });

        let graph = build_graph(&[a]);
        let edge = graph
            .edges
            .iter()
            .find(|e| e.label == "design")
            .expect("design edge");
        assert_eq!(edge.from, "figma_FK1_1_2");
        assert_eq!(edge.to, "jira_ABC_1");
    }

    #[test]
    fn graph_is_stable_across_runs() {
        let mut a = row("ABC-1");
        a.code.push(pr42());
        let rows = vec![a];

        let g1 = build_graph(&rows);
        let g2 = build_graph(&rows);
        assert_eq!(g1.nodes, g2.nodes);
        assert_eq!(g1.edges, g2.edges);
    }
}

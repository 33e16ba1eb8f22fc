//! Renderer: correlation state → table, orphan summary, and graph text.
//!
//! Pure formatting. Identical inputs always yield byte-identical output;
//! timestamps are the report writer's concern, not this module's.

use traceboard_shared::OrphanSets;

use crate::enrich::EnrichedRow;
use crate::graph::Graph;

/// The rendered pieces of a traceability report.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub table: String,
    pub orphan_summary: String,
    pub graph_text: String,
}

/// Render rows, orphans, and graph into their report representations.
///
/// `item_base_url` is the tracker site base; when present, item keys render
/// as `[KEY](<base>/browse/KEY)` links.
pub fn render(
    rows: &[EnrichedRow],
    orphans: &OrphanSets,
    graph: &Graph,
    item_base_url: Option<&str>,
) -> RenderedReport {
    RenderedReport {
        table: render_table(rows, item_base_url),
        orphan_summary: render_orphans(orphans),
        graph_text: render_graph(graph),
    }
}

/// Markdown correlation matrix, one row per work item.
pub fn render_table(rows: &[EnrichedRow], item_base_url: Option<&str>) -> String {
    let mut lines = vec![
        "| Jira | Status | Figma link(s) | PR link(s) | Confluence link(s) |".to_string(),
        "|---|---|---|---|---|".to_string(),
    ];

    for row in rows {
        let item = match item_base_url {
            Some(base) => format!(
                "[{}]({}/browse/{})",
                row.item.key,
                base.trim_end_matches('/'),
                row.item.key
            ),
            None => row.item.key.clone(),
        };

        let design = link_list(row.design.iter().map(|d| d.url.as_str()));
        let code = link_list(row.code.iter().map(|c| c.reference.url.as_str()));
        let docs = link_list(row.docs.iter().map(|d| d.reference.url.as_str()));

        lines.push(format!(
            "| {item} | {} | {design} | {code} | {docs} |",
            escape_pipes(&row.item.status),
        ));
    }

    lines.join("\n")
}

/// The three-line orphan summary.
pub fn render_orphans(orphans: &OrphanSets) -> String {
    [
        format!(
            "- **Tickets without Figma links**: {}",
            keys_or_none(&orphans.no_design)
        ),
        format!(
            "- **Tickets without PR links**: {}",
            keys_or_none(&orphans.no_code)
        ),
        format!(
            "- **Tickets without Confluence links**: {}",
            keys_or_none(&orphans.no_docs)
        ),
    ]
    .join("\n")
}

/// Line-oriented graph description: node declarations, then edge declarations.
pub fn render_graph(graph: &Graph) -> String {
    let mut lines = vec!["flowchart LR".to_string(), "  %% Nodes".to_string()];

    for node in &graph.nodes {
        lines.push(format!("  {}[\"{}\"]", node.id, escape_pipes(&node.label)));
    }

    lines.push("  %% Edges".to_string());
    for edge in &graph.edges {
        lines.push(format!(
            "  {} -->|\"{}\"| {}",
            edge.from,
            escape_pipes(&edge.label),
            edge.to
        ));
    }

    lines.join("\n")
}

fn link_list<'a>(urls: impl Iterator<Item = &'a str>) -> String {
    let links: Vec<String> = urls.map(|u| format!("[link]({u})")).collect();
    if links.is_empty() {
        "—".to_string()
    } else {
        links.join(" ")
    }
}

fn keys_or_none(keys: &[String]) -> String {
    if keys.is_empty() {
        "None".to_string()
    } else {
        keys.join(", ")
    }
}

/// Escape characters that would break table cells or mermaid labels.
fn escape_pipes(s: &str) -> String {
    s.replace('|', "\\|")
}

//! Traceability pipeline: work items → correlation → enrichment → report.

use std::path::PathBuf;

use tracing::{info, instrument};

use traceboard_connectors::JiraClient;
use traceboard_report::{Report, mermaid_fence};
use traceboard_shared::{Result, WorkItem};

use crate::correlate::{correlate, orphans};
use crate::enrich::{CodeChangeClient, DocsPageClient, EnrichOptions, enrich_rows};
use crate::graph::build_graph;
use crate::render::render;

use super::generated_at;

const REPORT_FILE: &str = "traceability.graph.md";

const ORPHAN_NOTE: &str = "_Note: “Designs without tickets” requires a defined set of target \
                           Figma nodes or a naming convention (e.g., Jira keys in node names)._";

/// Validated options for one traceability run.
#[derive(Debug, Clone)]
pub struct TraceabilityConfig {
    /// JQL-like filter selecting the work items.
    pub query: String,
    /// Maximum items fetched from the tracker.
    pub max_results: u32,
    /// Bound on enrichment calls per reference kind per item.
    pub max_enrich_per_kind: usize,
    /// Directory the report is written into.
    pub out_dir: PathBuf,
}

/// Outcome of a traceability run.
#[derive(Debug)]
pub struct TraceabilityResult {
    pub report_path: PathBuf,
    pub row_count: usize,
    pub code_enrichment: bool,
    pub docs_enrichment: bool,
}

/// Run the traceability pipeline.
///
/// Enrichment is capability-gated: a `None` client skips that kind entirely.
/// Enrichment failures never abort the run.
#[instrument(skip_all, fields(query = %config.query))]
pub async fn run(
    config: &TraceabilityConfig,
    jira: &JiraClient,
    code_client: Option<&dyn CodeChangeClient>,
    docs_client: Option<&dyn DocsPageClient>,
) -> Result<TraceabilityResult> {
    let res = jira
        .search(
            &config.query,
            &["summary", "description", "status"],
            config.max_results,
        )
        .await?;

    let items: Vec<WorkItem> = res
        .issues
        .iter()
        .map(|issue| WorkItem {
            key: issue.key.clone(),
            summary: issue.fields.summary.clone().unwrap_or_default(),
            description: issue.fields.description.clone().unwrap_or_default(),
            status: issue.fields.status_name().to_string(),
        })
        .collect();

    info!(items = items.len(), "correlating work items");

    let rows = correlate(&items);
    let orphan_sets = orphans(&rows);
    let graph = build_graph(&rows);

    let opts = EnrichOptions {
        code_client,
        docs_client,
        max_per_kind: config.max_enrich_per_kind,
    };
    let enriched = enrich_rows(&rows, &opts).await;

    let rendered = render(&enriched, &orphan_sets, &graph, Some(jira.base_url()));

    let inputs = [
        format!("- **JQL**: `{}`", config.query),
        format!("- **Max results**: {}", config.max_results),
        format!(
            "- **PR enrichment**: {}",
            if code_client.is_some() {
                "enabled"
            } else {
                "disabled (no code host token)"
            }
        ),
        format!(
            "- **Confluence enrichment**: {}",
            if docs_client.is_some() {
                "enabled"
            } else {
                "disabled (no wiki credentials)"
            }
        ),
    ]
    .join("\n");

    let report = Report::new("Design-to-delivery traceability graph")
        .section("Inputs", inputs)
        .section(
            "Orphans (gaps)",
            format!("{}\n\n{ORPHAN_NOTE}", rendered.orphan_summary),
        )
        .section("Matrix", rendered.table)
        .section("Graph", mermaid_fence(&rendered.graph_text));

    let report_path = report.write(&config.out_dir.join(REPORT_FILE), &generated_at())?;

    Ok(TraceabilityResult {
        report_path,
        row_count: rows.len(),
        code_enrichment: code_client.is_some(),
        docs_enrichment: docs_client.is_some(),
    })
}

//! Design drift pipeline: snapshot of a design file's high-level shape.

use std::path::PathBuf;

use tracing::instrument;

use traceboard_connectors::FigmaClient;
use traceboard_report::Report;
use traceboard_shared::Result;

use super::generated_at;

const REPORT_FILE: &str = "figma.design-drift.md";

/// Validated options for one design drift run.
#[derive(Debug, Clone)]
pub struct DesignDriftConfig {
    pub file_key: String,
    pub out_dir: PathBuf,
}

/// Run the design drift pipeline: fetch file metadata and record stats.
#[instrument(skip_all, fields(file_key = %config.file_key))]
pub async fn run(config: &DesignDriftConfig, figma: &FigmaClient) -> Result<PathBuf> {
    let file = figma.get_file(&config.file_key).await?;

    let name = if file.name.is_empty() {
        "(unknown)".to_string()
    } else {
        file.name
    };
    let top_level_pages = file.document.map(|d| d.children.len()).unwrap_or(0);

    let report = Report::new("Figma design drift (starter report)")
        .section("Inputs", format!("- **File key**: `{}`", config.file_key))
        .section(
            "Snapshot",
            format!("- **File name**: {name}\n- **Top-level pages**: {top_level_pages}"),
        )
        .section(
            "Next steps",
            "- Map components → node ids\n\
             - Enumerate variants/states\n\
             - Diff vs Storybook index + implementation tokens",
        );

    report.write(&config.out_dir.join(REPORT_FILE), &generated_at())
}

//! Markdown report assembly and writing.
//!
//! A report is a title plus ordered sections. Rendering is a deterministic
//! function of the report and the caller-supplied timestamp; writing creates
//! parent directories as needed.

use std::path::{Path, PathBuf};

use tracing::info;

use traceboard_shared::{Result, TraceboardError};

/// One `##` section of a report.
#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub body: String,
}

impl Section {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A markdown report: `# title`, a `Generated:` line, then sections.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section, returning `self` for chaining.
    pub fn section(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.sections.push(Section::new(title, body));
        self
    }

    /// Render the report to markdown. `generated_at` is any preformatted
    /// timestamp; identical inputs yield byte-identical output.
    pub fn to_markdown(&self, generated_at: &str) -> String {
        let mut lines: Vec<String> = Vec::new();
        lines.push(format!("# {}", self.title));
        lines.push(String::new());
        lines.push(format!("Generated: {generated_at}"));
        lines.push(String::new());

        for s in &self.sections {
            lines.push(format!("## {}", s.title));
            lines.push(String::new());
            lines.push(s.body.trim_end().to_string());
            lines.push(String::new());
        }

        lines.join("\n")
    }

    /// Render and write the report to `out_file`, creating parent directories.
    pub fn write(&self, out_file: &Path, generated_at: &str) -> Result<PathBuf> {
        if let Some(parent) = out_file.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TraceboardError::io(parent, e))?;
        }

        std::fs::write(out_file, self.to_markdown(generated_at))
            .map_err(|e| TraceboardError::io(out_file, e))?;

        info!(path = %out_file.display(), "report written");
        Ok(out_file.to_path_buf())
    }
}

/// Wrap a graph description in a fenced mermaid block.
pub fn mermaid_fence(graph_text: &str) -> String {
    format!("```mermaid\n{}\n```", graph_text.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_title_sections_and_timestamp() {
        let report = Report::new("Demo report")
            .section("Inputs", "- **JQL**: `order by updated DESC`")
            .section("Result", "All good.\n");

        let md = report.to_markdown("2026-08-31T00:00:00Z");
        assert!(md.starts_with("# Demo report\n\nGenerated: 2026-08-31T00:00:00Z\n"));
        assert!(md.contains("## Inputs\n\n- **JQL**: `order by updated DESC`\n"));
        // Trailing whitespace in bodies is trimmed.
        assert!(md.contains("## Result\n\nAll good.\n"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let report = Report::new("R").section("S", "body");
        assert_eq!(
            report.to_markdown("2026-01-01T00:00:00Z"),
            report.to_markdown("2026-01-01T00:00:00Z")
        );
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("traceboard-report-{}", std::process::id()));
        let out = dir.join("nested").join("out.md");

        let report = Report::new("R").section("S", "body");
        let written = report.write(&out, "2026-01-01T00:00:00Z").expect("write");
        assert!(written.exists());

        let content = std::fs::read_to_string(&written).expect("read back");
        assert!(content.contains("# R"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn mermaid_fence_wraps_graph() {
        let fenced = mermaid_fence("flowchart LR\n  a --> b\n");
        assert_eq!(fenced, "```mermaid\nflowchart LR\n  a --> b\n```");
    }
}

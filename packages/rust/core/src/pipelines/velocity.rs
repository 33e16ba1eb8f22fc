//! Velocity pipeline: issue counts by type for a tracker search.

use std::path::PathBuf;

use tracing::instrument;

use traceboard_connectors::JiraClient;
use traceboard_report::Report;
use traceboard_shared::Result;

use crate::tally::{count_table, sorted_desc, tally};

use super::generated_at;

const REPORT_FILE: &str = "jira.velocity.md";

/// How many issues the sample list shows.
const SAMPLE_SIZE: usize = 10;

/// Validated options for one velocity run.
#[derive(Debug, Clone)]
pub struct VelocityConfig {
    pub query: String,
    pub max_results: u32,
    pub out_dir: PathBuf,
}

/// Run the velocity pipeline: pull issues, tally by type, tabulate.
#[instrument(skip_all, fields(query = %config.query))]
pub async fn run(config: &VelocityConfig, jira: &JiraClient) -> Result<PathBuf> {
    let res = jira
        .search(
            &config.query,
            &["key", "summary", "status", "issuetype"],
            config.max_results,
        )
        .await?;

    let by_type = sorted_desc(tally(
        res.issues.iter().map(|i| i.fields.issue_type_name()),
    ));

    let sample: Vec<String> = res
        .issues
        .iter()
        .take(SAMPLE_SIZE)
        .map(|i| {
            format!(
                "- **{}**: {}",
                i.key,
                i.fields.summary.as_deref().unwrap_or("")
            )
        })
        .collect();
    let sample = if sample.is_empty() {
        "- (none)".to_string()
    } else {
        sample.join("\n")
    };

    let report = Report::new("Jira velocity (starter report)")
        .section(
            "Inputs",
            format!(
                "- **JQL**: `{}`\n- **Max results**: {}",
                config.query, config.max_results
            ),
        )
        .section("Issue type breakdown", count_table("issue type", &by_type))
        .section("Sample issues", sample);

    report.write(&config.out_dir.join(REPORT_FILE), &generated_at())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn tallies_by_type_and_samples() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/3/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "issues": [
                    {"key": "ABC-1", "fields": {"summary": "One", "issuetype": {"name": "Bug"}}},
                    {"key": "ABC-2", "fields": {"summary": "Two", "issuetype": {"name": "Story"}}},
                    {"key": "ABC-3", "fields": {"summary": "Three", "issuetype": {"name": "Bug"}}}
                ]
            })))
            .mount(&server)
            .await;

        let jira = JiraClient::new(&server.uri(), "bot@example.com", "token").unwrap();
        let out_dir =
            std::env::temp_dir().join(format!("traceboard-velocity-{}", std::process::id()));
        let config = VelocityConfig {
            query: "project = ABC".into(),
            max_results: 50,
            out_dir: out_dir.clone(),
        };

        let report_path = run(&config, &jira).await.expect("pipeline ok");
        let content = std::fs::read_to_string(&report_path).expect("report readable");

        assert!(content.contains("| Bug | 2 |"));
        assert!(content.contains("| Story | 1 |"));
        // Bug (count 2) sorts before Story (count 1).
        assert!(content.find("| Bug | 2 |").unwrap() < content.find("| Story | 1 |").unwrap());
        assert!(content.contains("- **ABC-1**: One"));

        std::fs::remove_dir_all(&out_dir).ok();
    }
}

//! Node snapshot pipeline: metadata for a single design node.

use std::path::PathBuf;

use tracing::{instrument, warn};

use traceboard_connectors::FigmaClient;
use traceboard_report::Report;
use traceboard_shared::Result;

use super::generated_at;

const REPORT_FILE: &str = "figma.node-snapshot.md";

/// Validated options for one node snapshot run.
#[derive(Debug, Clone)]
pub struct NodeSnapshotConfig {
    pub file_key: String,
    pub node_id: String,
    pub out_dir: PathBuf,
}

/// Run the node snapshot pipeline against a single node id (`62:31062` form).
#[instrument(skip_all, fields(file_key = %config.file_key, node_id = %config.node_id))]
pub async fn run(config: &NodeSnapshotConfig, figma: &FigmaClient) -> Result<PathBuf> {
    let nodes = figma.get_nodes(&config.file_key, &[&config.node_id]).await?;

    let inputs = format!(
        "- **File key**: `{}`\n- **Node id**: `{}`",
        config.file_key, config.node_id
    );

    let report = match nodes.document(&config.node_id) {
        Some(doc) => {
            let size = doc
                .absolute_bounding_box
                .as_ref()
                .map(|b| format!("{} × {}", b.width.round(), b.height.round()))
                .unwrap_or_else(|| "(unknown)".to_string());
            Report::new("Figma node snapshot")
                .section("Inputs", inputs)
                .section(
                    "Node",
                    format!(
                        "- **Name**: {}\n- **Type**: {}\n- **Size**: {size}",
                        doc.name, doc.node_type
                    ),
                )
                .section(
                    "Next steps",
                    "- Export node render via images endpoint\n\
                     - Compare against implemented component screenshot",
                )
        }
        None => {
            warn!(node_id = %config.node_id, "node not present in response");
            Report::new("Figma node snapshot")
                .section("Inputs", inputs)
                .section(
                    "Result",
                    "- ❌ **Node not found** (check node id / permissions).",
                )
        }
    };

    report.write(&config.out_dir.join(REPORT_FILE), &generated_at())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn temp_out(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("traceboard-node-{tag}-{}", std::process::id()))
    }

    #[tokio::test]
    async fn snapshots_node_metadata() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/files/FK1/nodes"))
            .and(query_param("ids", "62:31062"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "nodes": {
                    "62:31062": {
                        "document": {
                            "name": "Button/Primary",
                            "type": "COMPONENT",
                            "absoluteBoundingBox": {"width": 120.4, "height": 48.0}
                        }
                    }
                }
            })))
            .mount(&server)
            .await;

        let figma = FigmaClient::new(&server.uri(), "token").unwrap();
        let out_dir = temp_out("found");
        let config = NodeSnapshotConfig {
            file_key: "FK1".into(),
            node_id: "62:31062".into(),
            out_dir: out_dir.clone(),
        };

        let report_path = run(&config, &figma).await.expect("pipeline ok");
        let content = std::fs::read_to_string(&report_path).expect("report readable");

        assert!(content.contains("- **Name**: Button/Primary"));
        assert!(content.contains("- **Type**: COMPONENT"));
        assert!(content.contains("- **Size**: 120 × 48"));

        std::fs::remove_dir_all(&out_dir).ok();
    }

    #[tokio::test]
    async fn missing_node_reports_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/files/FK1/nodes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "nodes": {}
            })))
            .mount(&server)
            .await;

        let figma = FigmaClient::new(&server.uri(), "token").unwrap();
        let out_dir = temp_out("missing");
        let config = NodeSnapshotConfig {
            file_key: "FK1".into(),
            node_id: "1:1".into(),
            out_dir: out_dir.clone(),
        };

        let report_path = run(&config, &figma).await.expect("pipeline ok");
        let content = std::fs::read_to_string(&report_path).expect("report readable");

        assert!(content.contains("❌ **Node not found**"));

        std::fs::remove_dir_all(&out_dir).ok();
    }
}

//! Design tool (Figma) client for file and node metadata.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use traceboard_shared::Result;

use crate::{build_http, send_json, trim_base};

/// Client for the Figma REST API, authenticated with a personal access token.
#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: reqwest::Client,
    api_base_url: String,
    token: String,
}

impl FigmaClient {
    /// Create a client against the given API base URL
    /// (`https://api.figma.com` outside of tests).
    pub fn new(api_base_url: &str, token: &str) -> Result<Self> {
        Ok(Self {
            http: build_http()?,
            api_base_url: trim_base(api_base_url),
            token: token.to_string(),
        })
    }

    /// Fetch a design file's top-level metadata.
    pub async fn get_file(&self, file_key: &str) -> Result<FileResponse> {
        let url = format!("{}/v1/files/{file_key}", self.api_base_url);
        debug!(file_key, "figma file lookup");

        let request = self.http.get(&url).header("X-Figma-Token", &self.token);
        send_json(request, &url).await
    }

    /// Fetch specific nodes of a design file by id (e.g. `62:31062`).
    pub async fn get_nodes(&self, file_key: &str, node_ids: &[&str]) -> Result<NodesResponse> {
        let url = format!("{}/v1/files/{file_key}/nodes", self.api_base_url);
        debug!(file_key, ?node_ids, "figma nodes lookup");

        let request = self
            .http
            .get(&url)
            .header("X-Figma-Token", &self.token)
            .query(&[("ids", node_ids.join(","))]);

        send_json(request, &url).await
    }
}

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

/// `GET /v1/files/{key}` response subset.
#[derive(Debug, Clone, Deserialize)]
pub struct FileResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub document: Option<FileDocument>,
}

/// The file's root document node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileDocument {
    /// Top-level pages of the file.
    #[serde(default)]
    pub children: Vec<serde_json::Value>,
}

/// `GET /v1/files/{key}/nodes` response subset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodesResponse {
    #[serde(default)]
    pub nodes: HashMap<String, NodeWrapper>,
}

impl NodesResponse {
    /// The document for a node id, if the service returned one.
    pub fn document(&self, node_id: &str) -> Option<&NodeDocument> {
        self.nodes.get(node_id)?.document.as_ref()
    }
}

/// Per-node wrapper in the nodes response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeWrapper {
    #[serde(default)]
    pub document: Option<NodeDocument>,
}

/// One design node's metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub node_type: String,
    #[serde(default, rename = "absoluteBoundingBox")]
    pub absolute_bounding_box: Option<BoundingBox>,
}

/// A node's absolute bounding box.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

//! Documentation wiki (Confluence) client.

use serde::Deserialize;
use tracing::debug;

use traceboard_shared::Result;

use crate::{build_http, send_json, trim_base};

/// Client for the Confluence cloud v2 API, authenticated with basic auth.
#[derive(Debug, Clone)]
pub struct ConfluenceClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    api_token: String,
}

impl ConfluenceClient {
    /// Create a client for the given wiki base URL.
    pub fn new(base_url: &str, email: &str, api_token: &str) -> Result<Self> {
        Ok(Self {
            http: build_http()?,
            base_url: trim_base(base_url),
            email: email.to_string(),
            api_token: api_token.to_string(),
        })
    }

    /// Fetch one page's metadata.
    pub async fn get_page(&self, page_id: u64) -> Result<PageResponse> {
        let url = format!("{}/api/v2/pages/{page_id}", self.base_url);
        debug!(page_id, "confluence page lookup");

        let request = self
            .http
            .get(&url)
            .basic_auth(&self.email, Some(&self.api_token));

        send_json(request, &url).await
    }
}

/// The page fields traceboard consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub title: String,
}

//! Code host (GitHub) client for pull request metadata.

use serde::Deserialize;
use tracing::debug;

use traceboard_shared::Result;

use crate::{build_http, send_json, trim_base};

const API_VERSION: &str = "2022-11-28";

/// Client for the GitHub REST API, authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base_url: String,
    token: String,
}

impl GithubClient {
    /// Create a client against the given API base URL
    /// (`https://api.github.com` outside of tests).
    pub fn new(api_base_url: &str, token: &str) -> Result<Self> {
        Ok(Self {
            http: build_http()?,
            api_base_url: trim_base(api_base_url),
            token: token.to_string(),
        })
    }

    /// Fetch one pull request's metadata.
    pub async fn get_pull(&self, owner: &str, repo: &str, number: u64) -> Result<PullResponse> {
        let url = format!("{}/repos/{owner}/{repo}/pulls/{number}", self.api_base_url);
        debug!(owner, repo, number, "github pull lookup");

        let request = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header("X-GitHub-Api-Version", API_VERSION);

        send_json(request, &url).await
    }
}

/// The pull request fields traceboard consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct PullResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub merged_at: Option<String>,
}

//! HTTP clients for the collaboration services traceboard reads from.
//!
//! One module per service:
//! - [`jira`] — issue tracker search and agile board/sprint endpoints
//! - [`github`] — code host pull request metadata
//! - [`confluence`] — documentation wiki pages
//! - [`figma`] — design tool files and nodes
//!
//! Clients are thin: build a request, check the status, decode JSON. No
//! retries anywhere; callers decide what a failure means.

pub mod confluence;
pub mod figma;
pub mod github;
pub mod jira;

use std::time::Duration;

use serde::de::DeserializeOwned;
use traceboard_shared::{Result, TraceboardError};

pub use confluence::ConfluenceClient;
pub use figma::FigmaClient;
pub use github::GithubClient;
pub use jira::JiraClient;

/// Build the shared reqwest client with user agent and timeout.
pub(crate) fn build_http() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("traceboard/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| TraceboardError::Network(format!("client build: {e}")))
}

/// Send a prepared request and decode a JSON body, mapping transport errors
/// to [`TraceboardError::Network`] and non-2xx responses to
/// [`TraceboardError::Service`].
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    url: &str,
) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| TraceboardError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(TraceboardError::Service {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| TraceboardError::parse(format!("{url}: {e}")))
}

/// Strip trailing slashes from a configured base URL.
pub(crate) fn trim_base(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

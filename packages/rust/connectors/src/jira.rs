//! Issue tracker (Jira) client: JQL search plus agile board/sprint reads.

use serde::Deserialize;
use tracing::debug;

use traceboard_shared::Result;

use crate::{build_http, send_json, trim_base};

/// Client for the Jira REST and Agile APIs, authenticated with basic auth.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    api_token: String,
}

impl JiraClient {
    /// Create a client for the given site base URL (trailing slashes are
    /// tolerated and stripped).
    pub fn new(base_url: &str, email: &str, api_token: &str) -> Result<Self> {
        Ok(Self {
            http: build_http()?,
            base_url: trim_base(base_url),
            email: email.to_string(),
            api_token: api_token.to_string(),
        })
    }

    /// The configured site base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Browse URL for an issue key, e.g. `https://site/browse/ABC-1`.
    pub fn issue_url(&self, key: &str) -> String {
        format!("{}/browse/{key}", self.base_url)
    }

    /// Run a JQL search returning the requested fields.
    pub async fn search(
        &self,
        jql: &str,
        fields: &[&str],
        max_results: u32,
    ) -> Result<SearchResponse> {
        let url = format!("{}/rest/api/3/search", self.base_url);
        debug!(jql, max_results, "jira search");

        let request = self
            .http
            .get(&url)
            .basic_auth(&self.email, Some(&self.api_token))
            .query(&[
                ("jql", jql.to_string()),
                ("maxResults", max_results.to_string()),
                ("fields", fields.join(",")),
            ]);

        send_json(request, &url).await
    }

    /// Fetch the active sprint for a board, if any.
    pub async fn active_sprint(&self, board_id: u64) -> Result<Option<Sprint>> {
        let url = format!(
            "{}/rest/agile/1.0/board/{board_id}/sprint",
            self.base_url
        );
        debug!(board_id, "jira active sprint lookup");

        let request = self
            .http
            .get(&url)
            .basic_auth(&self.email, Some(&self.api_token))
            .query(&[("state", "active")]);

        let list: SprintList = send_json(request, &url).await?;
        Ok(list.values.into_iter().next())
    }

    /// Fetch the issues in a sprint with the requested fields.
    pub async fn sprint_issues(
        &self,
        sprint_id: u64,
        fields: &[&str],
        max_results: u32,
    ) -> Result<SearchResponse> {
        let url = format!(
            "{}/rest/agile/1.0/sprint/{sprint_id}/issue",
            self.base_url
        );
        debug!(sprint_id, max_results, "jira sprint issues");

        let request = self
            .http
            .get(&url)
            .basic_auth(&self.email, Some(&self.api_token))
            .query(&[
                ("maxResults", max_results.to_string()),
                ("fields", fields.join(",")),
            ]);

        send_json(request, &url).await
    }
}

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

/// Search or sprint-issue response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// One issue with its requested fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

/// The subset of issue fields the pipelines request, plus a catch-all for
/// custom fields (story points live in a site-specific `customfield_*`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<StatusField>,
    #[serde(default)]
    pub issuetype: Option<NamedField>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl IssueFields {
    /// Status name, empty when absent.
    pub fn status_name(&self) -> &str {
        self.status
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or("")
    }

    /// Status category key: `todo`, `indeterminate`, or `done`.
    pub fn status_category_key(&self) -> &str {
        self.status
            .as_ref()
            .and_then(|s| s.status_category.as_ref())
            .and_then(|c| c.key.as_deref())
            .unwrap_or("unknown")
    }

    /// Issue type name, `Unknown` when absent.
    pub fn issue_type_name(&self) -> &str {
        self.issuetype
            .as_ref()
            .and_then(|t| t.name.as_deref())
            .unwrap_or("Unknown")
    }

    /// Numeric story point estimate from the named custom field.
    pub fn story_points(&self, field_name: &str) -> Option<f64> {
        self.extra.get(field_name)?.as_f64()
    }
}

/// Issue status with its category.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusField {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "statusCategory")]
    pub status_category: Option<StatusCategory>,
}

/// Jira's fixed status category triple.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusCategory {
    #[serde(default)]
    pub key: Option<String>,
}

/// A field that only carries a display name (issue type, priority, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct NamedField {
    #[serde(default)]
    pub name: Option<String>,
}

/// Agile API sprint list wrapper.
#[derive(Debug, Clone, Default, Deserialize)]
struct SprintList {
    #[serde(default)]
    values: Vec<Sprint>,
}

/// One agile sprint.
#[derive(Debug, Clone, Deserialize)]
pub struct Sprint {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
}

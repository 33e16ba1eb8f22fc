//! Application configuration for traceboard.
//!
//! User config lives at `~/.traceboard/traceboard.toml`. Credentials are never
//! stored in the file; each service section names the environment variable
//! holding its token. CLI flags override config file values, which override
//! defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TraceboardError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "traceboard.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".traceboard";

// ---------------------------------------------------------------------------
// Config structs (matching traceboard.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Issue tracker settings.
    #[serde(default)]
    pub jira: JiraConfig,

    /// Code host settings.
    #[serde(default)]
    pub github: GithubConfig,

    /// Documentation wiki settings.
    #[serde(default)]
    pub confluence: ConfluenceConfig,

    /// Design tool settings.
    #[serde(default)]
    pub figma: FigmaConfig,

    /// Traceability pipeline settings.
    #[serde(default)]
    pub trace: TraceConfig,

    /// Board sprint pipeline settings.
    #[serde(default)]
    pub sprint: SprintConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory reports are written into.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Default maximum results per tracker search.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            max_results: default_max_results(),
        }
    }
}

fn default_out_dir() -> String {
    "reports".into()
}
fn default_max_results() -> u32 {
    50
}

/// `[jira]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Site base URL, e.g. `https://example.atlassian.net`.
    #[serde(default)]
    pub base_url: String,

    /// Account email used for basic auth.
    #[serde(default)]
    pub email: String,

    /// Name of the env var holding the API token (never the token itself).
    #[serde(default = "default_jira_token_env")]
    pub api_token_env: String,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            email: String::new(),
            api_token_env: default_jira_token_env(),
        }
    }
}

fn default_jira_token_env() -> String {
    "JIRA_API_TOKEN".into()
}

/// `[github]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// API base URL (overridable for tests and GitHub Enterprise).
    #[serde(default = "default_github_api")]
    pub api_base_url: String,

    /// Name of the env var holding the access token.
    #[serde(default = "default_github_token_env")]
    pub token_env: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_github_api(),
            token_env: default_github_token_env(),
        }
    }
}

fn default_github_api() -> String {
    "https://api.github.com".into()
}
fn default_github_token_env() -> String {
    "GITHUB_TOKEN".into()
}

/// `[confluence]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfluenceConfig {
    /// Wiki base URL, e.g. `https://example.atlassian.net/wiki`.
    #[serde(default)]
    pub base_url: String,

    /// Account email used for basic auth.
    #[serde(default)]
    pub email: String,

    /// Name of the env var holding the API token.
    #[serde(default = "default_confluence_token_env")]
    pub api_token_env: String,
}

impl Default for ConfluenceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            email: String::new(),
            api_token_env: default_confluence_token_env(),
        }
    }
}

fn default_confluence_token_env() -> String {
    "CONFLUENCE_API_TOKEN".into()
}

/// `[figma]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigmaConfig {
    /// API base URL (overridable for tests).
    #[serde(default = "default_figma_api")]
    pub api_base_url: String,

    /// Name of the env var holding the personal access token.
    #[serde(default = "default_figma_token_env")]
    pub token_env: String,

    /// File key for the design pipelines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_key: Option<String>,

    /// Node id for the node snapshot pipeline, e.g. `62:31062`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

impl Default for FigmaConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_figma_api(),
            token_env: default_figma_token_env(),
            file_key: None,
            node_id: None,
        }
    }
}

fn default_figma_api() -> String {
    "https://api.figma.com".into()
}
fn default_figma_token_env() -> String {
    "FIGMA_TOKEN".into()
}

/// `[trace]` section — traceability pipeline options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    /// JQL-like filter selecting the work items to correlate.
    #[serde(default = "default_trace_query")]
    pub query: String,

    /// Maximum number of references enriched per kind per item.
    #[serde(default = "default_max_enrich")]
    pub max_enrich_per_kind: usize,

    /// Attempt code-change enrichment when the code host token is available.
    #[serde(default = "default_true")]
    pub enable_code_enrichment: bool,

    /// Attempt doc-page enrichment when wiki credentials are available.
    #[serde(default = "default_true")]
    pub enable_docs_enrichment: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            query: default_trace_query(),
            max_enrich_per_kind: default_max_enrich(),
            enable_code_enrichment: true,
            enable_docs_enrichment: true,
        }
    }
}

fn default_trace_query() -> String {
    "order by updated DESC".into()
}
fn default_max_enrich() -> usize {
    5
}
fn default_true() -> bool {
    true
}

/// `[sprint]` section — board sprint pipeline options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprintConfig {
    /// Agile board id. Required by the sprint pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<u64>,

    /// Optional project key, echoed in the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,

    /// Custom field carrying story point estimates.
    #[serde(default = "default_story_points_field")]
    pub story_points_field: String,
}

impl Default for SprintConfig {
    fn default() -> Self {
        Self {
            board_id: None,
            project_key: None,
            story_points_field: default_story_points_field(),
        }
    }
}

fn default_story_points_field() -> String {
    "customfield_10016".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.traceboard/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TraceboardError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.traceboard/traceboard.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TraceboardError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| TraceboardError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| TraceboardError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| TraceboardError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| TraceboardError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

// ---------------------------------------------------------------------------
// Credential resolution
// ---------------------------------------------------------------------------

/// Read the token from the named env var, failing with a config error if it
/// is unset or empty. Called once at the pipeline boundary, never mid-run.
pub fn require_env_token(var_name: &str) -> Result<String> {
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(TraceboardError::config(format!(
            "{var_name} is not set. Export it or adjust the *_env key in traceboard.toml."
        ))),
    }
}

/// Whether the named env var holds a non-empty token. Used for capability
/// gating of optional enrichment.
pub fn env_token_present(var_name: &str) -> bool {
    std::env::var(var_name).is_ok_and(|v| !v.is_empty())
}

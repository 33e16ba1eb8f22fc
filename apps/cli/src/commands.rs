//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use traceboard_connectors::{ConfluenceClient, FigmaClient, GithubClient, JiraClient};
use traceboard_core::enrich::{CodeChangeClient, DocsPageClient};
use traceboard_core::pipelines::{
    board_sprint, demo, design_drift, node_snapshot, traceability, velocity,
};
use traceboard_shared::{
    AppConfig, env_token_present, init_config, load_config, require_env_token,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Traceboard — correlate tracker items with designs, PRs, and docs.
#[derive(Parser)]
#[command(
    name = "traceboard",
    version,
    about = "Generate status reports correlating tracker items with design files, pull requests, and wiki pages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run all configured pipelines, or a single one by name.
    Run {
        /// Pipeline name: traceability, jira-velocity, board-sprint,
        /// design-drift, node-snapshot, or demo. Omit to run all.
        pipeline: Option<String>,

        /// Output directory for reports (defaults to the configured out_dir).
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "traceboard=info",
        1 => "traceboard=debug",
        _ => "traceboard=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run { pipeline, out } => cmd_run(pipeline.as_deref(), out.as_deref()).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Pipeline runner
// ---------------------------------------------------------------------------

/// All pipeline names, in run order.
const PIPELINES: &[&str] = &[
    "traceability",
    "jira-velocity",
    "board-sprint",
    "design-drift",
    "node-snapshot",
    "demo",
];

async fn cmd_run(pipeline: Option<&str>, out: Option<&str>) -> Result<()> {
    let config = load_config()?;

    let out_dir = match out {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(&config.defaults.out_dir),
    };

    let selected: Vec<&str> = match pipeline {
        Some(name) => {
            if !PIPELINES.contains(&name) {
                return Err(eyre!(
                    "unknown pipeline '{name}': expected one of {}",
                    PIPELINES.join(", ")
                ));
            }
            vec![name]
        }
        None => PIPELINES.to_vec(),
    };
    let explicit = pipeline.is_some();

    let mut failures: Vec<String> = Vec::new();
    for name in selected {
        let spinner = spinner();
        spinner.set_message(format!("Running: {name}"));

        let outcome = run_pipeline(name, &config, &out_dir).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(Some(report_path)) => {
                info!(pipeline = name, report = %report_path.display(), "pipeline completed");
                println!("OK: {name} → {}", report_path.display());
            }
            Ok(None) => {
                // Not configured. A skip is fine when running everything but
                // an error when the user asked for this pipeline by name.
                if explicit {
                    failures.push(format!("{name}: required configuration missing"));
                    eprintln!("FAILED: {name} (required configuration missing)");
                } else {
                    warn!(pipeline = name, "skipping: required configuration missing");
                    println!("SKIPPED: {name} (not configured)");
                }
            }
            Err(e) => {
                tracing::error!(pipeline = name, error = %e, "pipeline failed");
                eprintln!("FAILED: {name}");
                eprintln!("{e}");
                failures.push(format!("{name}: {e}"));
            }
        }
    }

    if !failures.is_empty() {
        return Err(eyre!("{} pipeline(s) failed", failures.len()));
    }
    Ok(())
}

/// Run one pipeline. `Ok(None)` means its required configuration is absent.
async fn run_pipeline(
    name: &str,
    config: &AppConfig,
    out_dir: &PathBuf,
) -> Result<Option<PathBuf>> {
    match name {
        "traceability" => {
            let Some(jira) = jira_client(config)? else {
                return Ok(None);
            };

            // Enrichment is capability-gated on tokens; a missing token
            // degrades to bare links rather than failing the run.
            let github = code_client(config)?;
            let confluence = docs_client(config)?;

            let trace_config = traceability::TraceabilityConfig {
                query: config.trace.query.clone(),
                max_results: config.defaults.max_results,
                max_enrich_per_kind: config.trace.max_enrich_per_kind,
                out_dir: out_dir.clone(),
            };
            let result = traceability::run(
                &trace_config,
                &jira,
                github.as_ref().map(|c| c as &dyn CodeChangeClient),
                confluence.as_ref().map(|c| c as &dyn DocsPageClient),
            )
            .await?;
            Ok(Some(result.report_path))
        }
        "jira-velocity" => {
            let Some(jira) = jira_client(config)? else {
                return Ok(None);
            };
            let velocity_config = velocity::VelocityConfig {
                query: config.trace.query.clone(),
                max_results: config.defaults.max_results,
                out_dir: out_dir.clone(),
            };
            Ok(Some(velocity::run(&velocity_config, &jira).await?))
        }
        "board-sprint" => {
            let (Some(jira), Some(board_id)) = (jira_client(config)?, config.sprint.board_id)
            else {
                return Ok(None);
            };
            let sprint_config = board_sprint::BoardSprintConfig {
                board_id,
                project_key: config.sprint.project_key.clone(),
                story_points_field: config.sprint.story_points_field.clone(),
                out_dir: out_dir.clone(),
            };
            let result = board_sprint::run(&sprint_config, &jira).await?;
            Ok(Some(result.report_path))
        }
        "design-drift" => {
            let (Some(figma), Some(file_key)) =
                (figma_client(config)?, config.figma.file_key.clone())
            else {
                return Ok(None);
            };
            let drift_config = design_drift::DesignDriftConfig {
                file_key,
                out_dir: out_dir.clone(),
            };
            Ok(Some(design_drift::run(&drift_config, &figma).await?))
        }
        "node-snapshot" => {
            let (Some(figma), Some(file_key), Some(node_id)) = (
                figma_client(config)?,
                config.figma.file_key.clone(),
                config.figma.node_id.clone(),
            ) else {
                return Ok(None);
            };
            let snapshot_config = node_snapshot::NodeSnapshotConfig {
                file_key,
                node_id,
                out_dir: out_dir.clone(),
            };
            Ok(Some(node_snapshot::run(&snapshot_config, &figma).await?))
        }
        "demo" => {
            let demo_config = demo::DemoConfig {
                out_dir: out_dir.clone(),
            };
            let result = demo::run(&demo_config)?;
            Ok(Some(result.report_path))
        }
        _ => Err(eyre!("unknown pipeline '{name}'")),
    }
}

// ---------------------------------------------------------------------------
// Client construction (capability gating at the boundary)
// ---------------------------------------------------------------------------

/// Tracker client, or `None` when the tracker section is not filled in.
fn jira_client(config: &AppConfig) -> Result<Option<JiraClient>> {
    let jira = &config.jira;
    if jira.base_url.is_empty()
        || jira.email.is_empty()
        || !env_token_present(&jira.api_token_env)
    {
        return Ok(None);
    }
    let token = require_env_token(&jira.api_token_env)?;
    Ok(Some(JiraClient::new(&jira.base_url, &jira.email, &token)?))
}

/// Design tool client, or `None` when its token is absent.
fn figma_client(config: &AppConfig) -> Result<Option<FigmaClient>> {
    let figma = &config.figma;
    if !env_token_present(&figma.token_env) {
        return Ok(None);
    }
    let token = require_env_token(&figma.token_env)?;
    Ok(Some(FigmaClient::new(&figma.api_base_url, &token)?))
}

/// Code host client for PR enrichment, when enabled and a token is present.
fn code_client(config: &AppConfig) -> Result<Option<GithubClient>> {
    if !config.trace.enable_code_enrichment || !env_token_present(&config.github.token_env) {
        return Ok(None);
    }
    let token = require_env_token(&config.github.token_env)?;
    Ok(Some(GithubClient::new(&config.github.api_base_url, &token)?))
}

/// Wiki client for docs enrichment, when enabled and credentials are present.
fn docs_client(config: &AppConfig) -> Result<Option<ConfluenceClient>> {
    let confluence = &config.confluence;
    if !config.trace.enable_docs_enrichment
        || confluence.base_url.is_empty()
        || confluence.email.is_empty()
        || !env_token_present(&confluence.api_token_env)
    {
        return Ok(None);
    }
    let token = require_env_token(&confluence.api_token_env)?;
    Ok(Some(ConfluenceClient::new(
        &confluence.base_url,
        &confluence.email,
        &token,
    )?))
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

fn spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(
            style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
    }
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

// ---------------------------------------------------------------------------
// Config commands
// ---------------------------------------------------------------------------

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

//! Shared types, error model, and configuration for traceboard.
//!
//! This crate is the foundation depended on by all other traceboard crates.
//! It provides:
//! - [`TraceboardError`] — the unified error type
//! - Domain types ([`WorkItem`], [`ArtifactReference`], [`CorrelationRow`], [`OrphanSets`])
//! - Configuration ([`AppConfig`], config loading, credential resolution)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ConfluenceConfig, DefaultsConfig, FigmaConfig, GithubConfig, JiraConfig,
    SprintConfig, TraceConfig, config_dir, config_file_path, env_token_present, init_config,
    load_config, load_config_from, require_env_token,
};
pub use error::{Result, TraceboardError};
pub use types::{
    ArtifactReference, CodeChangeRef, CorrelationRow, DesignRef, DocRef, OrphanSets, WorkItem,
};

//! The report pipelines: pull from a service, compute, write markdown.
//!
//! Each pipeline takes an explicit, already-validated config value plus the
//! clients it needs, and returns the path of the report it wrote. Missing
//! required configuration is rejected at the CLI boundary before any pipeline
//! runs.

pub mod board_sprint;
pub mod demo;
pub mod design_drift;
pub mod node_snapshot;
pub mod traceability;
pub mod velocity;

/// Timestamp for the report header.
pub(crate) fn generated_at() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

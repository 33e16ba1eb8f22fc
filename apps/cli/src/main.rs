//! Traceboard CLI — status-report generator for delivery teams.
//!
//! Pulls work items, code changes, design files, and wiki pages, correlates
//! them, and writes markdown reports under `reports/`.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}

//! Fifth CLI binary entry point.
//!
//! Parses command-line arguments with clap, loads `.fifth/config.yaml`,
//! initializes the tracing subscriber, and dispatches to the selected
//! subcommand via [`Cli::run`].

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use fifth_core::load_project_config;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.engine_config();

    let config_path = config.config_path();
    let project = load_project_config(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    // Clean old logs (best-effort, before tracing is initialized).
    logging::cleanup_old_logs(&config.logs_dir(), project.logging.retention_days);

    let _guard = logging::init_tracing(&config, &project)?;

    cli.run(&project)
}

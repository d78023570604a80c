//! vidbatch
//!
//! Batch video transcoding and deterministic file renumbering for directory
//! trees.
//!
//! # Usage
//!
//! ```bash
//! vidbatch rename ./Season1 --only webm --style episode
//! vidbatch transcode ./videos --stream
//! vidbatch remux --here --skip-existing
//! ```
//!
//! Exit status is 0 on success, 1 when the run was aborted (missing root,
//! missing encoder, bad configuration) and 2 when it completed with per-file
//! errors.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use vidbatch::cli::{self, commands, Cli, Commands, EXIT_FATAL};
use vidbatch::config_initialization::load_configuration;
use vidbatch::utils::logging::LoggingConfig;

/// Main entry point for the vidbatch CLI application
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let logging = LoggingConfig {
        level: cli.log_level.clone(),
        format: cli.log_format,
        ..LoggingConfig::default()
    };
    if let Err(e) = logging.initialize() {
        eprintln!("vidbatch: {}", e);
        return ExitCode::from(EXIT_FATAL);
    }

    info!("Starting vidbatch {}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_configuration(cli.config.as_deref())?;

    // Execute the requested command
    let report = match cli.command {
        Commands::Rename(args) => {
            info!("Executing rename command");
            commands::rename(args, &config)?
        }
        Commands::Transcode(args) => {
            info!("Executing transcode command");
            commands::transcode(args, &config)?
        }
        Commands::Remux(args) => {
            info!("Executing remux command");
            commands::remux(args, &config)?
        }
    };

    if cli.json {
        commands::print_report(&report)?;
    }

    Ok(cli::exit_code(&report))
}

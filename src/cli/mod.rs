//! CLI module for vidbatch
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::domain::model::BatchReport;
use crate::utils::logging::LogFormat;

pub mod args;
pub mod commands;

/// Everything completed
pub const EXIT_OK: u8 = 0;
/// The run was aborted before or during processing
pub const EXIT_FATAL: u8 = 1;
/// The run completed but some items failed
pub const EXIT_COMPLETED_WITH_ERRORS: u8 = 2;

/// vidbatch
///
/// Batch video transcoding and deterministic ordinal renaming for directory
/// trees. Do not modify the tree from elsewhere while a command runs.
#[derive(Parser, Debug)]
#[command(name = "vidbatch")]
#[command(about = "Batch transcode videos and renumber files across a directory tree")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level or filter directive; RUST_LOG takes precedence
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Full, global = true)]
    pub log_format: LogFormat,

    /// TOML configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Print the run report as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prefix files of every directory with a fresh ordinal
    Rename(args::RenameArgs),
    /// Encode videos to WebM next to the originals
    Transcode(args::TranscodeArgs),
    /// Stream-copy videos with faststart into a mirrored output tree
    Remux(args::RemuxArgs),
}

/// Exit status for a finished run
pub fn exit_code(report: &BatchReport) -> ExitCode {
    if report.has_errors() {
        ExitCode::from(EXIT_COMPLETED_WITH_ERRORS)
    } else {
        ExitCode::from(EXIT_OK)
    }
}

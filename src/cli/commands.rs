//! Command implementations

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::adapters::StdFileOps;
use crate::cli::args::{RemuxArgs, RenameArgs, TranscodeArgs};
use crate::config::AppConfig;
use crate::config_initialization::{remux_job, rename_config, transcode_job};
use crate::domain::model::BatchReport;
use crate::engine::{EncodeJob, Renamer};

/// Execute the rename command
pub fn rename(args: RenameArgs, config: &AppConfig) -> Result<BatchReport> {
    let rename_config =
        rename_config(&config.rename, &args).context("Invalid rename configuration")?;
    let root = args.target.resolve();

    let fs = StdFileOps::new();
    let report = Renamer::new(&rename_config, &fs)
        .run(&root)
        .context("Rename aborted")?;

    log_summary(&report);
    Ok(report)
}

/// Execute the transcode command
pub fn transcode(args: TranscodeArgs, config: &AppConfig) -> Result<BatchReport> {
    let (job_config, encoder) =
        transcode_job(&config.transcode, &args).context("Invalid transcode configuration")?;
    let root = args.target.resolve();

    let fs = StdFileOps::new();
    let report = EncodeJob::new(&job_config, &encoder, &fs)
        .run(&root)
        .context("Transcode aborted")?;

    log_summary(&report);
    Ok(report)
}

/// Execute the remux command
pub fn remux(args: RemuxArgs, config: &AppConfig) -> Result<BatchReport> {
    let (job_config, encoder) =
        remux_job(&config.remux, &args).context("Invalid remux configuration")?;
    let root = args.target.resolve();

    let fs = StdFileOps::new();
    let report = EncodeJob::new(&job_config, &encoder, &fs)
        .run(&root)
        .context("Remux aborted")?;

    log_summary(&report);
    Ok(report)
}

/// Print the report as pretty JSON on stdout
pub fn print_report(report: &BatchReport) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")?;
    println!("{}", json);
    Ok(())
}

fn log_summary(report: &BatchReport) {
    info!(
        command = %report.command,
        directories = report.directories,
        processed = report.processed,
        changed = report.changed,
        unchanged = report.unchanged,
        skipped = report.skipped,
        failed = report.failed(),
        "All tasks finished"
    );

    for failure in &report.failures {
        warn!(path = %failure.path.display(), "Failed: {}", failure.message);
    }
}

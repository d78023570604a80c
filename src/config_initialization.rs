//! Configuration initialization and hierarchy management
//!
//! Precedence: CLI > config file > defaults.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::adapters::{ProcessEncoder, TomlConfigAdapter};
use crate::cli::args::{RemuxArgs, RenameArgs, TranscodeArgs};
use crate::config::{AppConfig, RemuxSettings, RenameSettings, TranscodeSettings};
use crate::domain::model::{normalize_extension, normalize_extensions, ExtensionFilter, PrefixStyle};
use crate::engine::{EncodeJobConfig, OutputLayout, RenameConfig};
use crate::error::{VidbatchError, VidbatchResult};
use crate::ports::OutputMode;

/// Load the config file if one was given, otherwise the defaults
pub fn load_configuration(config_path: Option<&Path>) -> VidbatchResult<AppConfig> {
    let config = TomlConfigAdapter::load(config_path)?;
    if config_path.is_none() {
        info!("No config file given, using built-in defaults");
    }
    Ok(config)
}

/// CLI list if any were given, otherwise the configured one
fn pick<'a, T>(cli: &'a [T], configured: &'a [T]) -> &'a [T] {
    if cli.is_empty() {
        configured
    } else {
        cli
    }
}

fn merged_paths(configured: &[PathBuf], cli: &[PathBuf]) -> Vec<PathBuf> {
    configured.iter().chain(cli).cloned().collect()
}

fn encoder_program(cli: Option<&str>, configured: &str) -> VidbatchResult<String> {
    let program = cli.unwrap_or(configured).trim();
    if program.is_empty() {
        return Err(VidbatchError::Config {
            message: "encoder program must not be empty".to_string(),
        });
    }
    Ok(program.to_string())
}

fn output_mode(stream: bool) -> OutputMode {
    if stream {
        OutputMode::Stream
    } else {
        OutputMode::Capture
    }
}

fn checked_extensions(extensions: &[String]) -> VidbatchResult<Vec<String>> {
    let normalized = normalize_extensions(extensions)?;
    if normalized.is_empty() {
        warn!("Extension list is empty; no file will qualify");
    }
    Ok(normalized)
}

/// Resolve the renamer configuration
pub fn rename_config(settings: &RenameSettings, args: &RenameArgs) -> VidbatchResult<RenameConfig> {
    let style = match &args.style {
        Some(style) => PrefixStyle::parse(style)?,
        None => settings.style,
    };

    // A filter given on the command line replaces the configured one entirely
    let (only, exclude) = if args.only.is_empty() && args.exclude.is_empty() {
        (settings.only.as_slice(), settings.exclude.as_slice())
    } else {
        (args.only.as_slice(), args.exclude.as_slice())
    };

    let filter = match (only.is_empty(), exclude.is_empty()) {
        (true, true) => ExtensionFilter::All,
        (false, true) => ExtensionFilter::include(only)?,
        (true, false) => ExtensionFilter::exclude(exclude)?,
        (false, false) => {
            return Err(VidbatchError::Config {
                message: "'only' and 'exclude' extension filters cannot be combined".to_string(),
            })
        }
    };

    Ok(RenameConfig {
        style,
        filter,
        exclude_paths: merged_paths(&settings.exclude_paths, &args.exclude_paths),
        dry_run: args.dry_run,
    })
}

/// Resolve the transcode job and its encoder
pub fn transcode_job(
    settings: &TranscodeSettings,
    args: &TranscodeArgs,
) -> VidbatchResult<(EncodeJobConfig, ProcessEncoder)> {
    let extension = normalize_extension(
        args.output_ext
            .as_deref()
            .unwrap_or(&settings.output_extension),
    )?;

    let config = EncodeJobConfig {
        extensions: checked_extensions(pick(&args.extensions, &settings.extensions))?,
        params: settings.params.clone(),
        layout: OutputLayout::Sibling { extension },
        skip_existing: true,
        exclude_paths: merged_paths(&settings.exclude_paths, &args.exclude_paths),
        ..EncodeJobConfig::transcode()
    };

    let encoder = ProcessEncoder::new(
        encoder_program(args.encoder.as_deref(), &settings.encoder)?,
        output_mode(args.stream || settings.stream_output),
    );
    Ok((config, encoder))
}

/// Resolve the remux job and its encoder
pub fn remux_job(
    settings: &RemuxSettings,
    args: &RemuxArgs,
) -> VidbatchResult<(EncodeJobConfig, ProcessEncoder)> {
    let output_root = args
        .output_dir
        .clone()
        .unwrap_or_else(|| settings.output_dir.clone());

    let config = EncodeJobConfig {
        extensions: checked_extensions(pick(&args.extensions, &settings.extensions))?,
        params: settings.params.clone(),
        layout: OutputLayout::Mirror { output_root },
        skip_existing: args.skip_existing || settings.skip_existing,
        exclude_paths: merged_paths(&settings.exclude_paths, &args.exclude_paths),
        ..EncodeJobConfig::remux()
    };

    let encoder = ProcessEncoder::new(
        encoder_program(args.encoder.as_deref(), &settings.encoder)?,
        output_mode(args.stream || settings.stream_output),
    );
    Ok((config, encoder))
}

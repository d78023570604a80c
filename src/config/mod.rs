//! Configuration structures and their documented defaults
//!
//! Precedence is CLI flags > config file > the defaults below. A config
//! file is only read when passed explicitly with `--config`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::model::PrefixStyle;

/// Default encoder program for both encode jobs
pub const DEFAULT_ENCODER: &str = "ffmpeg";

/// Video extensions picked up by `transcode`
pub const DEFAULT_TRANSCODE_EXTENSIONS: &[&str] = &[".mp4", ".mkv", ".avi", ".mov", ".flv", ".wmv"];

/// VP9 / Opus WebM parameters used by `transcode`
pub const DEFAULT_TRANSCODE_PARAMS: &[&str] = &[
    "-c:v", "libvpx-vp9", "-crf", "31", "-b:v", "0", "-cpu-used", "4", "-c:a", "libopus", "-b:a",
    "192k",
];

/// Extension written by `transcode`
pub const DEFAULT_TRANSCODE_OUTPUT_EXTENSION: &str = ".webm";

/// Extensions picked up by `remux`
pub const DEFAULT_REMUX_EXTENSIONS: &[&str] = &[".mp4"];

/// Stream-copy with the moov atom moved to the front
pub const DEFAULT_REMUX_PARAMS: &[&str] = &["-c", "copy", "-movflags", "+faststart", "-y"];

/// Output directory for `remux`, relative to the processing root
pub const DEFAULT_REMUX_OUTPUT_DIR: &str = "processed";

pub(crate) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Top-level configuration file layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub rename: RenameSettings,
    pub transcode: TranscodeSettings,
    pub remux: RemuxSettings,
}

/// `[rename]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenameSettings {
    pub style: PrefixStyle,
    /// Only files ending in these extensions are renamed
    pub only: Vec<String>,
    /// Files ending in these extensions are left alone
    pub exclude: Vec<String>,
    pub exclude_paths: Vec<PathBuf>,
}

/// `[transcode]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranscodeSettings {
    pub encoder: String,
    pub extensions: Vec<String>,
    pub output_extension: String,
    pub params: Vec<String>,
    pub stream_output: bool,
    pub exclude_paths: Vec<PathBuf>,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            encoder: DEFAULT_ENCODER.to_string(),
            extensions: strings(DEFAULT_TRANSCODE_EXTENSIONS),
            output_extension: DEFAULT_TRANSCODE_OUTPUT_EXTENSION.to_string(),
            params: strings(DEFAULT_TRANSCODE_PARAMS),
            stream_output: false,
            exclude_paths: Vec::new(),
        }
    }
}

/// `[remux]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemuxSettings {
    pub encoder: String,
    pub extensions: Vec<String>,
    /// Relative paths are taken relative to the processing root
    pub output_dir: PathBuf,
    pub params: Vec<String>,
    pub skip_existing: bool,
    pub stream_output: bool,
    pub exclude_paths: Vec<PathBuf>,
}

impl Default for RemuxSettings {
    fn default() -> Self {
        Self {
            encoder: DEFAULT_ENCODER.to_string(),
            extensions: strings(DEFAULT_REMUX_EXTENSIONS),
            output_dir: PathBuf::from(DEFAULT_REMUX_OUTPUT_DIR),
            params: strings(DEFAULT_REMUX_PARAMS),
            skip_existing: false,
            stream_output: false,
            exclude_paths: Vec::new(),
        }
    }
}

//! Batch encoding over a directory tree
//!
//! Drives the external encoder once per qualifying file. `transcode` writes
//! a sibling with a new extension; `remux` writes into a mirrored tree under
//! an output root that is itself excluded from the walk.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, error, info};

use crate::config::{
    strings, DEFAULT_REMUX_EXTENSIONS, DEFAULT_REMUX_OUTPUT_DIR, DEFAULT_REMUX_PARAMS,
    DEFAULT_TRANSCODE_EXTENSIONS, DEFAULT_TRANSCODE_OUTPUT_EXTENSION, DEFAULT_TRANSCODE_PARAMS,
};
use crate::domain::model::{BatchReport, ExtensionFilter};
use crate::engine::walker::{DirectorySnapshot, TreeWalker};
use crate::error::{VidbatchError, VidbatchResult};
use crate::ports::{EncodeOutcome, EncodeRequest, Encoder, FileOps};
use crate::utils::format_duration;
use crate::utils::path::{display_relative, validate_root};

/// Where an input's output file goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLayout {
    /// Next to the input, extension replaced (e.g. `.webm`)
    Sibling { extension: String },
    /// Same relative path under an output root
    Mirror { output_root: PathBuf },
}

/// Configuration of one encode job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeJobConfig {
    /// Command name used in the report
    pub name: String,
    /// Normalized extensions (`.mp4`) of qualifying inputs
    pub extensions: Vec<String>,
    pub params: Vec<String>,
    pub layout: OutputLayout,
    /// Skip inputs whose output already exists instead of invoking the encoder
    pub skip_existing: bool,
    pub exclude_paths: Vec<PathBuf>,
}

impl EncodeJobConfig {
    /// VP9/Opus WebM transcode next to each input
    pub fn transcode() -> Self {
        Self {
            name: "transcode".to_string(),
            extensions: strings(DEFAULT_TRANSCODE_EXTENSIONS),
            params: strings(DEFAULT_TRANSCODE_PARAMS),
            layout: OutputLayout::Sibling {
                extension: DEFAULT_TRANSCODE_OUTPUT_EXTENSION.to_string(),
            },
            skip_existing: true,
            exclude_paths: Vec::new(),
        }
    }

    /// Faststart stream-copy into a mirrored `processed/` tree
    pub fn remux() -> Self {
        Self {
            name: "remux".to_string(),
            extensions: strings(DEFAULT_REMUX_EXTENSIONS),
            params: strings(DEFAULT_REMUX_PARAMS),
            layout: OutputLayout::Mirror {
                output_root: PathBuf::from(DEFAULT_REMUX_OUTPUT_DIR),
            },
            skip_existing: false,
            exclude_paths: Vec::new(),
        }
    }
}

/// Runs the encoder over every qualifying file under a root
pub struct EncodeJob<'a> {
    config: &'a EncodeJobConfig,
    encoder: &'a dyn Encoder,
    fs: &'a dyn FileOps,
}

impl<'a> EncodeJob<'a> {
    /// Create a new encode job
    pub fn new(config: &'a EncodeJobConfig, encoder: &'a dyn Encoder, fs: &'a dyn FileOps) -> Self {
        Self {
            config,
            encoder,
            fs,
        }
    }

    /// Encode every qualifying file under `root`.
    ///
    /// Returns early only on a missing root or a missing encoder; failures
    /// of individual files are logged and collected in the report. The
    /// encoder is checked before the walk, so an unusable encoder leaves the
    /// tree untouched.
    pub fn run(&self, root: &Path) -> VidbatchResult<BatchReport> {
        let root = validate_root(root)?;
        self.encoder.preflight()?;
        let layout = self.resolve_layout(&root);

        let mut excludes = self.config.exclude_paths.clone();
        if let OutputLayout::Mirror { output_root } = &layout {
            excludes.push(output_root.clone());
        }

        info!(
            job = %self.config.name,
            root = %root.display(),
            encoder = self.encoder.program(),
            "Starting batch"
        );

        let filter = ExtensionFilter::Include(self.config.extensions.clone());
        let mut report = BatchReport::new(self.config.name.as_str(), &root);
        let started = Instant::now();

        for snapshot in TreeWalker::new(&root, &excludes).directories() {
            match snapshot {
                Ok(snapshot) => {
                    self.process_directory(&root, &layout, &filter, &snapshot, &mut report)?
                }
                Err(e) => {
                    error!(error = %e, "Failed to read directory");
                    report.record_failure(e.path().unwrap_or(&root), e.to_string());
                }
            }
        }

        report.finish();
        info!(
            job = %self.config.name,
            elapsed = %format_duration(started.elapsed()),
            encoded = report.changed,
            skipped = report.skipped,
            failed = report.failed(),
            "Batch finished"
        );
        Ok(report)
    }

    fn resolve_layout(&self, root: &Path) -> OutputLayout {
        match &self.config.layout {
            OutputLayout::Mirror { output_root } if output_root.is_relative() => {
                OutputLayout::Mirror {
                    output_root: root.join(output_root),
                }
            }
            layout => layout.clone(),
        }
    }

    fn process_directory(
        &self,
        root: &Path,
        layout: &OutputLayout,
        filter: &ExtensionFilter,
        snapshot: &DirectorySnapshot,
        report: &mut BatchReport,
    ) -> VidbatchResult<()> {
        report.directories += 1;
        for _ in &snapshot.unsupported {
            report.record_skip();
        }

        for name in &snapshot.files {
            if !filter.matches(name) {
                debug!(dir = %snapshot.path.display(), file = %name, "Not a qualifying file");
                report.record_skip();
                continue;
            }

            let input = snapshot.path.join(name);
            match output_path(root, layout, &input) {
                Some(output) => self.process_file(root, input, output, report)?,
                None => {
                    error!(input = %input.display(), "Cannot derive output path");
                    report.record_item_failure(&input, "cannot derive output path");
                }
            }
        }
        Ok(())
    }

    fn process_file(
        &self,
        root: &Path,
        input: PathBuf,
        output: PathBuf,
        report: &mut BatchReport,
    ) -> VidbatchResult<()> {
        let label = display_relative(root, &input);

        if output == input {
            info!(input = %label, "Skipping: output would overwrite the input");
            report.record_skip();
            return Ok(());
        }

        if self.config.skip_existing && self.fs.exists(&output) {
            info!(input = %label, output = %output.display(), "Skipping: output already exists");
            report.record_skip();
            return Ok(());
        }

        if let Some(parent) = output.parent() {
            if !self.fs.exists(parent) {
                if let Err(e) = self.fs.create_dir_all(parent) {
                    error!(dir = %parent.display(), error = %e, "Failed to create output directory");
                    report.record_item_failure(&input, e.to_string());
                    return Ok(());
                }
            }
        }

        info!(input = %label, output = %output.display(), "Encoding");
        let request = EncodeRequest {
            input,
            output,
            params: self.config.params.clone(),
            label,
        };

        let started = Instant::now();
        // TODO: remove the partial output after a failed run so the next
        // transcode does not skip it as already existing.
        match self.encoder.encode(&request) {
            Ok(EncodeOutcome::Success) => {
                info!(
                    input = %request.label,
                    elapsed = %format_duration(started.elapsed()),
                    "Encoded"
                );
                report.record_changed();
            }
            Ok(EncodeOutcome::Failed { status, stderr }) => {
                error!(input = %request.label, status = %status, stderr = %stderr, "Encoding failed");
                let e = VidbatchError::EncoderFailed {
                    input: request.input.clone(),
                    status,
                    stderr,
                };
                report.record_item_failure(&request.input, e.to_string());
            }
            Err(e) if e.is_fatal() => {
                error!(error = %e, "Aborting batch");
                return Err(e);
            }
            Err(e) => {
                error!(input = %request.label, error = %e, "Encoding failed");
                report.record_item_failure(&request.input, e.to_string());
            }
        }
        Ok(())
    }
}

/// Output path for an input under the given layout
pub fn output_path(root: &Path, layout: &OutputLayout, input: &Path) -> Option<PathBuf> {
    match layout {
        OutputLayout::Sibling { extension } => {
            Some(input.with_extension(extension.trim_start_matches('.')))
        }
        OutputLayout::Mirror { output_root } => input
            .strip_prefix(root)
            .ok()
            .map(|relative| output_root.join(relative)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_output_replaces_extension() {
        let layout = OutputLayout::Sibling {
            extension: ".webm".to_string(),
        };
        let output = output_path(Path::new("/v"), &layout, Path::new("/v/s1/ep.one.MP4"));
        assert_eq!(output, Some(PathBuf::from("/v/s1/ep.one.webm")));
    }

    #[test]
    fn test_mirror_output_keeps_relative_path() {
        let layout = OutputLayout::Mirror {
            output_root: PathBuf::from("/v/processed"),
        };
        let output = output_path(Path::new("/v"), &layout, Path::new("/v/s1/ep1.mp4"));
        assert_eq!(output, Some(PathBuf::from("/v/processed/s1/ep1.mp4")));

        assert_eq!(output_path(Path::new("/v"), &layout, Path::new("/elsewhere/a.mp4")), None);
    }

    #[test]
    fn test_default_jobs() {
        let transcode = EncodeJobConfig::transcode();
        assert!(transcode.skip_existing);
        assert!(transcode.extensions.contains(&".mov".to_string()));

        let remux = EncodeJobConfig::remux();
        assert!(!remux.skip_existing);
        assert_eq!(remux.params, vec!["-c", "copy", "-movflags", "+faststart", "-y"]);
    }
}

// Ports - Interface definitions (contracts)

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use crate::error::VidbatchResult;

/// Port for the filesystem mutations the batch jobs perform
pub trait FileOps {
    /// Whether anything (file, directory, dangling link) occupies the path
    fn exists(&self, path: &Path) -> bool;

    /// Rename a file within the filesystem
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Create a directory and all of its parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// How the encoder's output is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Collect output, log stderr only on failure
    #[default]
    Capture,
    /// Forward every output line to the log as it arrives
    Stream,
}

/// One invocation of the external encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub params: Vec<String>,
    /// Short label prefixed to streamed output lines
    pub label: String,
}

impl EncodeRequest {
    /// Arguments passed after the program name: `-i input params.. output`
    pub fn arguments(&self) -> Vec<std::ffi::OsString> {
        let mut args = Vec::with_capacity(self.params.len() + 3);
        args.push("-i".into());
        args.push(self.input.clone().into_os_string());
        args.extend(self.params.iter().map(Into::into));
        args.push(self.output.clone().into_os_string());
        args
    }
}

/// Result of an encoder run that managed to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeOutcome {
    Success,
    Failed { status: String, stderr: String },
}

impl EncodeOutcome {
    /// Classify an exit status with its captured stderr
    pub fn from_status(status: ExitStatus, stderr: String) -> Self {
        if status.success() {
            EncodeOutcome::Success
        } else {
            EncodeOutcome::Failed {
                status: status.to_string(),
                stderr,
            }
        }
    }
}

/// Port for the external encoding collaborator
pub trait Encoder {
    /// Program name used in logs and error messages
    fn program(&self) -> &str;

    /// Check that the program can be started, before any file is touched.
    ///
    /// Returns `VidbatchError::EncoderNotFound` when it cannot.
    fn preflight(&self) -> VidbatchResult<()>;

    /// Run the encoder once.
    ///
    /// Returns `VidbatchError::EncoderNotFound` when the program cannot be
    /// started at all; a non-zero exit is an `EncodeOutcome::Failed`.
    fn encode(&self, request: &EncodeRequest) -> VidbatchResult<EncodeOutcome>;
}

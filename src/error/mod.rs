//! Error handling module for vidbatch

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for vidbatch operations
#[derive(Error, Debug)]
pub enum VidbatchError {
    /// Target root missing or not a directory
    #[error("Root directory does not exist or is not a directory: {}", path.display())]
    RootNotDirectory { path: PathBuf },

    /// External encoder executable could not be started
    #[error("Encoder executable not found: {program}. Make sure it is installed and on PATH")]
    EncoderNotFound { program: String },

    /// Encoder ran but exited unsuccessfully
    #[error("Encoder failed for {} ({status})", input.display())]
    EncoderFailed {
        input: PathBuf,
        status: String,
        stderr: String,
    },

    /// Rename target is already taken by another entry
    #[error("Refusing to overwrite {} while renaming {}", target.display(), source_path.display())]
    Collision {
        source_path: PathBuf,
        target: PathBuf,
    },

    /// Rename failed at the filesystem level
    #[error("Failed to rename {} -> {}: {source}", from.display(), to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory listing could not be read
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration file or value
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Directory walk error
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VidbatchError {
    /// Whether this error must abort the whole run rather than a single item
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            VidbatchError::RootNotDirectory { .. }
                | VidbatchError::EncoderNotFound { .. }
                | VidbatchError::Config { .. }
        )
    }

    /// The file or directory the error is about, when there is one
    pub fn path(&self) -> Option<&Path> {
        match self {
            VidbatchError::RootNotDirectory { path } | VidbatchError::ReadDir { path, .. } => {
                Some(path)
            }
            VidbatchError::EncoderFailed { input, .. } => Some(input),
            VidbatchError::Collision { source_path, .. } => Some(source_path),
            VidbatchError::RenameFailed { from, .. } => Some(from),
            VidbatchError::Walk(e) => e.path(),
            VidbatchError::EncoderNotFound { .. }
            | VidbatchError::Config { .. }
            | VidbatchError::Io(_) => None,
        }
    }
}

impl From<DomainError> for VidbatchError {
    fn from(error: DomainError) -> Self {
        VidbatchError::Config {
            message: error.to_string(),
        }
    }
}

/// Result type alias for vidbatch operations
pub type VidbatchResult<T> = std::result::Result<T, VidbatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let root = VidbatchError::RootNotDirectory {
            path: PathBuf::from("missing"),
        };
        assert!(root.is_fatal());

        let missing = VidbatchError::EncoderNotFound {
            program: "ffmpeg".to_string(),
        };
        assert!(missing.is_fatal());

        let failed = VidbatchError::EncoderFailed {
            input: PathBuf::from("a.mp4"),
            status: "exit status: 1".to_string(),
            stderr: String::new(),
        };
        assert!(!failed.is_fatal());

        let collision = VidbatchError::Collision {
            source_path: PathBuf::from("05_a.webm"),
            target: PathBuf::from("1_a.webm"),
        };
        assert!(!collision.is_fatal());
    }

    #[test]
    fn test_error_messages_name_paths() {
        let err = VidbatchError::Collision {
            source_path: PathBuf::from("05_a.webm"),
            target: PathBuf::from("1_a.webm"),
        };
        let message = err.to_string();
        assert!(message.contains("1_a.webm"));
        assert!(message.contains("05_a.webm"));
    }
}

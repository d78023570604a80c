// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;


/// Ordinal prefix style applied by the renamer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixStyle {
    /// `{counter}_`, unpadded
    #[default]
    Numeric,
    /// `E{counter:02}_`
    Episode,
}

impl PrefixStyle {
    /// Parse style from its CLI / config name
    pub fn parse(style: &str) -> Result<Self, DomainError> {
        match style.trim().to_lowercase().as_str() {
            "numeric" | "number" => Ok(PrefixStyle::Numeric),
            "episode" | "e" => Ok(PrefixStyle::Episode),
            other => Err(DomainError::UnknownStyle(other.to_string())),
        }
    }

    /// Render the tag for a counter value, without the trailing separator
    pub fn tag(&self, counter: u64) -> String {
        match self {
            PrefixStyle::Numeric => counter.to_string(),
            PrefixStyle::Episode => format!("E{:02}", counter),
        }
    }
}

impl fmt::Display for PrefixStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixStyle::Numeric => write!(f, "numeric"),
            PrefixStyle::Episode => write!(f, "episode"),
        }
    }
}

/// A previously applied prefix detected on a file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefix {
    /// Digits only, e.g. `3` in `3_old.webm`
    Numeric(String),
    /// `E` followed by digits, e.g. `E07` in `E07_pilot.mkv`
    Episode(String),
}

impl Prefix {
    /// Recognize a prefix token (the text before the first `_`)
    pub fn detect(token: &str) -> Option<Self> {
        fn all_digits(s: &str) -> bool {
            !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
        }

        if all_digits(token) {
            Some(Prefix::Numeric(token.to_string()))
        } else if let Some(digits) = token.strip_prefix('E') {
            all_digits(digits).then(|| Prefix::Episode(token.to_string()))
        } else {
            None
        }
    }

    /// The prefix token as it appeared in the file name
    pub fn as_str(&self) -> &str {
        match self {
            Prefix::Numeric(token) | Prefix::Episode(token) => token,
        }
    }

    /// Significant digits of the ordinal, without the `E` tag or leading zeros
    pub fn ordinal(&self) -> &str {
        let digits = match self {
            Prefix::Numeric(token) => token.as_str(),
            Prefix::Episode(token) => &token[1..],
        };
        digits.trim_start_matches('0')
    }
}

/// A file directly contained in a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub directory: PathBuf,
    pub file_name: String,
}

impl FileEntry {
    /// Create a new entry
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    /// Existing prefix, if the name carries one
    pub fn prefix(&self) -> Option<Prefix> {
        self.file_name
            .split_once('_')
            .and_then(|(token, _)| Prefix::detect(token))
    }
}

/// Which files of a directory qualify for processing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExtensionFilter {
    /// Every file qualifies
    #[default]
    All,
    /// Only files ending in one of these extensions
    Include(Vec<String>),
    /// Every file except those ending in one of these extensions
    Exclude(Vec<String>),
}

impl ExtensionFilter {
    /// Build an include filter, normalizing the extensions
    pub fn include<S: AsRef<str>>(extensions: &[S]) -> Result<Self, DomainError> {
        Ok(ExtensionFilter::Include(normalize_extensions(extensions)?))
    }

    /// Build an exclude filter, normalizing the extensions
    pub fn exclude<S: AsRef<str>>(extensions: &[S]) -> Result<Self, DomainError> {
        Ok(ExtensionFilter::Exclude(normalize_extensions(extensions)?))
    }

    /// Case-insensitive suffix match against the file name
    pub fn matches(&self, file_name: &str) -> bool {
        let lowered = file_name.to_lowercase();
        let ends_with_any =
            |exts: &[String]| exts.iter().any(|ext| lowered.ends_with(ext.as_str()));

        match self {
            ExtensionFilter::All => true,
            ExtensionFilter::Include(exts) => ends_with_any(exts),
            ExtensionFilter::Exclude(exts) => !ends_with_any(exts),
        }
    }
}

/// Normalize user-supplied extensions to lowercase with a leading dot
pub fn normalize_extensions<S: AsRef<str>>(extensions: &[S]) -> Result<Vec<String>, DomainError> {
    extensions
        .iter()
        .map(|ext| normalize_extension(ext.as_ref()))
        .collect()
}

/// Normalize one extension: `WebM` and `.webm` both become `.webm`
pub fn normalize_extension(extension: &str) -> Result<String, DomainError> {
    let trimmed = extension.trim().trim_start_matches('.');
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
        return Err(DomainError::InvalidExtension(extension.to_string()));
    }
    Ok(format!(".{}", trimmed.to_lowercase()))
}

/// One planned rename within a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRename {
    pub counter: u64,
    pub from: String,
    pub to: String,
}

impl PlannedRename {
    /// Whether the file already carries its target name
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Rename plan for a single directory, in counter order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub directory: PathBuf,
    pub renames: Vec<PlannedRename>,
    pub skipped: Vec<String>,
}

impl RenamePlan {
    /// Whether no file in the directory qualified
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}

/// Result of applying one planned rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "detail")]
pub enum RenameOutcome {
    Renamed,
    Unchanged,
    Planned,
    Collision,
    Failed(String),
}

/// A single per-item failure recorded in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Summary of one batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub command: String,
    pub root: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub directories: usize,
    pub processed: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failures: Vec<ItemFailure>,
}

impl BatchReport {
    /// Start a report for a command over a root
    pub fn new(command: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            root: root.into(),
            started_at: Utc::now(),
            finished_at: None,
            directories: 0,
            processed: 0,
            changed: 0,
            unchanged: 0,
            skipped: 0,
            failures: Vec::new(),
        }
    }

    /// Record the outcome of one rename
    pub fn record_rename(&mut self, path: &Path, outcome: &RenameOutcome) {
        match outcome {
            RenameOutcome::Renamed | RenameOutcome::Planned => self.record_changed(),
            RenameOutcome::Unchanged => self.record_unchanged(),
            RenameOutcome::Collision => self.record_item_failure(path, "target name already exists"),
            RenameOutcome::Failed(message) => self.record_item_failure(path, message.clone()),
        }
    }

    /// Record an item that was renamed or encoded
    pub fn record_changed(&mut self) {
        self.processed += 1;
        self.changed += 1;
    }

    /// Record an item that needed no change
    pub fn record_unchanged(&mut self) {
        self.processed += 1;
        self.unchanged += 1;
    }

    /// Record an item that was not processed
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Record an item that was processed and failed
    pub fn record_item_failure(&mut self, path: &Path, message: impl Into<String>) {
        self.processed += 1;
        self.record_failure(path, message);
    }

    /// Record a failure not tied to a processed item, e.g. an unreadable directory
    pub fn record_failure(&mut self, path: &Path, message: impl Into<String>) {
        self.failures.push(ItemFailure {
            path: path.to_path_buf(),
            message: message.into(),
        });
    }

    /// Number of failed items
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Whether any item failed
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Stamp the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }
}

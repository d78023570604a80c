//! Directory-scoped ordinal renamer
//!
//! Every directory under the root is renumbered on its own. Qualifying files
//! are ordered (already numbered files by their ordinal, the rest by name),
//! any earlier ordinal prefix is stripped and a fresh `{tag}{counter}_`
//! prefix is applied starting from 1. Renames never replace an existing path.
//!
//! The tree must not be modified by anything else while a run is in
//! progress; there is no locking and no rollback.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::domain::model::{
    BatchReport, ExtensionFilter, FileEntry, PlannedRename, PrefixStyle, RenameOutcome,
};
use crate::domain::rules::plan_directory;
use crate::engine::walker::{DirectorySnapshot, TreeWalker};
use crate::error::{VidbatchError, VidbatchResult};
use crate::ports::FileOps;
use crate::utils::path::validate_root;

/// Renamer configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenameConfig {
    pub style: PrefixStyle,
    pub filter: ExtensionFilter,
    pub exclude_paths: Vec<PathBuf>,
    /// Log the plan without touching the filesystem
    pub dry_run: bool,
}

/// Applies rename plans directory by directory
pub struct Renamer<'a> {
    config: &'a RenameConfig,
    fs: &'a dyn FileOps,
}

impl<'a> Renamer<'a> {
    /// Create a new renamer
    pub fn new(config: &'a RenameConfig, fs: &'a dyn FileOps) -> Self {
        Self { config, fs }
    }

    /// Rename every qualifying file under `root`.
    ///
    /// Only a missing or non-directory root is an error; per-file failures
    /// are logged and collected in the report.
    pub fn run(&self, root: &Path) -> VidbatchResult<BatchReport> {
        let root = validate_root(root)?;
        info!(
            root = %root.display(),
            style = %self.config.style,
            dry_run = self.config.dry_run,
            "Starting rename"
        );

        let mut report = BatchReport::new("rename", &root);
        let walker = TreeWalker::new(&root, &self.config.exclude_paths);
        for snapshot in walker.directories() {
            match snapshot {
                Ok(snapshot) => self.process_directory(&snapshot, &mut report),
                Err(e) => {
                    error!(error = %e, "Failed to read directory");
                    report.record_failure(e.path().unwrap_or(&root), e.to_string());
                }
            }
        }

        report.finish();
        Ok(report)
    }

    /// Renumber the files of a single directory
    pub fn process_directory(&self, snapshot: &DirectorySnapshot, report: &mut BatchReport) {
        report.directories += 1;
        let dir = snapshot.path.display();
        info!(dir = %dir, "Processing directory");

        for _ in &snapshot.unsupported {
            report.record_skip();
        }

        let plan = plan_directory(
            &snapshot.path,
            &snapshot.files,
            &self.config.filter,
            self.config.style,
        );

        for name in &plan.skipped {
            info!(dir = %dir, file = %name, "Skipping file that does not match the filter");
            report.record_skip();
        }

        if plan.is_empty() {
            info!(dir = %dir, "No qualifying files in directory");
            return;
        }

        let mut dry_run = self.config.dry_run.then(|| DryRun::new(&snapshot.files));
        for rename in &plan.renames {
            let outcome = self.apply(&plan.directory, rename, dry_run.as_mut());
            report.record_rename(&plan.directory.join(&rename.from), &outcome);
        }
    }

    fn apply(
        &self,
        directory: &Path,
        rename: &PlannedRename,
        dry_run: Option<&mut DryRun>,
    ) -> RenameOutcome {
        let dir = directory.display();
        if rename.is_noop() {
            debug!(dir = %dir, file = %rename.from, "Already named correctly");
            return RenameOutcome::Unchanged;
        }

        if let Some(prefix) = FileEntry::new(directory, rename.from.as_str()).prefix() {
            debug!(dir = %dir, file = %rename.from, prefix = prefix.as_str(), "Removing old prefix");
        }

        let from = directory.join(&rename.from);
        let to = directory.join(&rename.to);

        if let Some(dry_run) = dry_run {
            if dry_run.collides(&rename.to, self.fs.exists(&to)) {
                warn!(dir = %dir, from = %rename.from, to = %rename.to, "Rename would collide with an existing entry");
                return RenameOutcome::Collision;
            }
            dry_run.rename(&rename.from, &rename.to);
            info!(dir = %dir, from = %rename.from, to = %rename.to, "Would rename");
            return RenameOutcome::Planned;
        }

        match self.rename_file(&from, &to) {
            Ok(()) => {
                info!(dir = %dir, from = %rename.from, to = %rename.to, "Renamed");
                RenameOutcome::Renamed
            }
            Err(e @ VidbatchError::Collision { .. }) => {
                error!(error = %e, "Leaving file unchanged");
                RenameOutcome::Collision
            }
            Err(e) => {
                error!(error = %e, "Rename failed");
                RenameOutcome::Failed(e.to_string())
            }
        }
    }

    /// Rename one file, refusing to replace anything already at `to`
    pub fn rename_file(&self, from: &Path, to: &Path) -> VidbatchResult<()> {
        if self.fs.exists(to) {
            return Err(VidbatchError::Collision {
                source_path: from.to_path_buf(),
                target: to.to_path_buf(),
            });
        }

        self.fs
            .rename(from, to)
            .map_err(|source| VidbatchError::RenameFailed {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source,
            })
    }
}

/// Name bookkeeping for a dry run, so predicted collisions match what a
/// real run would hit after earlier renames in the same directory.
struct DryRun {
    listed: HashSet<String>,
    occupied: HashSet<String>,
}

impl DryRun {
    fn new(files: &[String]) -> Self {
        let listed: HashSet<String> = files.iter().cloned().collect();
        Self {
            occupied: listed.clone(),
            listed,
        }
    }

    /// `on_disk` covers entries outside the snapshot, such as subdirectories
    fn collides(&self, name: &str, on_disk: bool) -> bool {
        self.occupied.contains(name) || (on_disk && !self.listed.contains(name))
    }

    fn rename(&mut self, from: &str, to: &str) {
        self.occupied.remove(from);
        self.occupied.insert(to.to_string());
    }
}

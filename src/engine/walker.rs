//! Directory walker yielding per-directory file snapshots

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::{VidbatchError, VidbatchResult};
use crate::utils::path::{is_excluded, resolve_excludes};

/// Files directly contained in one directory, read once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySnapshot {
    pub path: PathBuf,
    /// File names, sorted byte-wise
    pub files: Vec<String>,
    /// Entries whose names are not valid UTF-8; never touched
    pub unsupported: Vec<PathBuf>,
}

impl DirectorySnapshot {
    /// Read the immediate files of a directory
    pub fn read(path: &Path) -> VidbatchResult<Self> {
        let mut files = Vec::new();
        let mut unsupported = Vec::new();

        let read_error = |source| VidbatchError::ReadDir {
            path: path.to_path_buf(),
            source,
        };

        for entry in fs::read_dir(path).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            // follows symlinks, so a link to a directory is not a file
            if entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(raw) => {
                    warn!(path = %entry.path().display(), "Skipping file with non UTF-8 name");
                    unsupported.push(path.join(raw));
                }
            }
        }
        files.sort();

        Ok(Self {
            path: path.to_path_buf(),
            files,
            unsupported,
        })
    }
}

/// Recursive walker over a root, pruning excluded subtrees
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    excludes: Vec<PathBuf>,
}

impl TreeWalker {
    /// Create a walker; relative exclude paths are resolved against the root
    pub fn new(root: &Path, excludes: &[PathBuf]) -> Self {
        Self {
            root: root.to_path_buf(),
            excludes: resolve_excludes(root, excludes),
        }
    }

    /// Whether a path is pruned from the walk
    pub fn is_excluded(&self, path: &Path) -> bool {
        is_excluded(path, &self.excludes)
    }

    /// Every non-excluded directory, parents before children, siblings in
    /// name order. An unreadable directory yields an `Err` item and the walk
    /// carries on.
    pub fn directories(&self) -> impl Iterator<Item = VidbatchResult<DirectorySnapshot>> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !(entry.file_type().is_dir() && self.is_excluded(entry.path())))
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_dir() => {
                    Some(DirectorySnapshot::read(entry.path()))
                }
                Ok(_) => None,
                Err(e) => Some(Err(e.into())),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_snapshot_lists_only_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("b.webm"));
        touch(&temp_dir.path().join("a.webm"));
        fs::create_dir(temp_dir.path().join("season2")).unwrap();

        let snapshot = DirectorySnapshot::read(temp_dir.path()).unwrap();
        assert_eq!(snapshot.files, vec!["a.webm", "b.webm"]);
        assert!(snapshot.unsupported.is_empty());
    }

    #[test]
    fn test_walk_visits_all_directories_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        touch(&root.join("top.mp4"));
        touch(&root.join("s2/x.mp4"));
        touch(&root.join("s1/y.mp4"));
        touch(&root.join("s1/extras/z.mp4"));

        let walker = TreeWalker::new(&root, &[]);
        let visited: Vec<PathBuf> = walker
            .directories()
            .map(|snapshot| snapshot.unwrap().path)
            .collect();

        assert_eq!(
            visited,
            vec![
                root.clone(),
                root.join("s1"),
                root.join("s1/extras"),
                root.join("s2"),
            ]
        );
    }

    #[test]
    fn test_walk_prunes_excluded_subtree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        touch(&root.join("a.mp4"));
        touch(&root.join("processed/a.mp4"));
        touch(&root.join("processed/nested/b.mp4"));

        let walker = TreeWalker::new(&root, &[PathBuf::from("processed")]);
        let visited: Vec<PathBuf> = walker
            .directories()
            .map(|snapshot| snapshot.unwrap().path)
            .collect();

        assert_eq!(visited, vec![root]);
    }
}

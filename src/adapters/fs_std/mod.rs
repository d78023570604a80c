// Standard filesystem adapter - FileOps over std::fs

use std::fs;
use std::io;
use std::path::Path;

use crate::ports::FileOps;

/// Filesystem adapter backed by `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileOps;

impl StdFileOps {
    /// Create new filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

impl FileOps for StdFileOps {
    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as occupied
        fs::symlink_metadata(path).is_ok()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }
}

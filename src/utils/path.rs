//! Path utilities for root validation and exclusion handling

use std::path::{Path, PathBuf};

use crate::error::{VidbatchError, VidbatchResult};

/// Check that the processing root exists and is a directory.
///
/// Returns the canonical root so later prefix comparisons against exclude
/// paths are made on absolute paths.
pub fn validate_root(root: &Path) -> VidbatchResult<PathBuf> {
    if !root.is_dir() {
        return Err(VidbatchError::RootNotDirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(root.canonicalize()?)
}

/// Resolve exclude paths against the root. Relative entries are taken
/// relative to the root, absolute ones are canonicalized when they exist.
pub fn resolve_excludes(root: &Path, excludes: &[PathBuf]) -> Vec<PathBuf> {
    excludes
        .iter()
        .map(|exclude| {
            let joined = if exclude.is_absolute() {
                exclude.clone()
            } else {
                root.join(exclude)
            };
            joined.canonicalize().unwrap_or(joined)
        })
        .collect()
}

/// Whether a path lies at or below any of the excluded paths
pub fn is_excluded(path: &Path, excludes: &[PathBuf]) -> bool {
    excludes.iter().any(|exclude| path.starts_with(exclude))
}

/// Path relative to the root for display, falling back to the full path
pub fn display_relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .ok()
        .filter(|rel| !rel.as_os_str().is_empty())
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_root_rejects_missing_and_files() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        assert!(matches!(
            validate_root(&missing),
            Err(VidbatchError::RootNotDirectory { .. })
        ));

        let file = temp_dir.path().join("clip.mp4");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(
            validate_root(&file),
            Err(VidbatchError::RootNotDirectory { .. })
        ));

        let root = validate_root(temp_dir.path()).unwrap();
        assert!(root.is_absolute());
    }

    #[test]
    fn test_resolve_excludes_relative_to_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        std::fs::create_dir(root.join("processed")).unwrap();

        let resolved = resolve_excludes(&root, &[PathBuf::from("processed")]);
        assert_eq!(resolved, vec![root.join("processed")]);
        assert!(is_excluded(&root.join("processed/nested"), &resolved));
        assert!(!is_excluded(&root.join("processed-old"), &resolved));
        assert!(!is_excluded(&root, &resolved));
    }

    #[test]
    fn test_display_relative() {
        let root = Path::new("/videos");
        assert_eq!(display_relative(root, Path::new("/videos/s1/a.mp4")), "s1/a.mp4");
        assert_eq!(display_relative(root, Path::new("/videos")), "/videos");
        assert_eq!(display_relative(root, Path::new("/other/a.mp4")), "/other/a.mp4");
    }
}

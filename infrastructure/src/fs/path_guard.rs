//! Path guard - the filesystem confinement boundary.
//!
//! Every read and write performed by the ecosystem passes through this
//! adapter. Authorization resolves the candidate to canonical absolute
//! form first (falling back to lexical normalization for paths that do
//! not exist yet), so relative-path tricks like `a/../../etc` cannot
//! escape the boundary.

use colony_application::{WorkspaceError, WorkspaceFiles};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

/// Folds `.` and `..` components without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            component => normalized.push(component),
        }
    }
    normalized
}

/// Confines all file access to a single workspace subtree.
///
/// The boundary is canonicalized once at construction and never changes.
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// Creates a guard over an existing workspace root.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, WorkspaceError> {
        let root = fs::canonicalize(root.as_ref()).map_err(|source| WorkspaceError::Io {
            path: root.as_ref().to_path_buf(),
            source,
        })?;
        info!(root = %root.display(), "path guard initialized");
        Ok(Self { root })
    }

    /// Canonical absolute form of `path`. Existing paths are resolved
    /// through the filesystem (symlinks included); paths not created yet
    /// are normalized lexically.
    fn normalize(&self, path: &Path) -> PathBuf {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        fs::canonicalize(&absolute).unwrap_or_else(|_| lexical_normalize(&absolute))
    }

    /// Normalizes and checks the boundary in one step.
    fn guarded(&self, path: &Path) -> Result<PathBuf, WorkspaceError> {
        let candidate = self.normalize(path);
        // Component-wise prefix check: /workspace2 never passes for a
        // /workspace boundary.
        if candidate.starts_with(&self.root) {
            Ok(candidate)
        } else {
            warn!(
                path = %candidate.display(),
                root = %self.root.display(),
                "access denied, path outside workspace boundary"
            );
            Err(WorkspaceError::AccessDenied(candidate))
        }
    }

    fn collect(&self, dir: &Path, out: &mut Vec<String>) -> Result<(), WorkspaceError> {
        let entries = fs::read_dir(dir).map_err(|source| WorkspaceError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| WorkspaceError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if path.is_dir() {
                if hidden {
                    continue;
                }
                self.collect(&path, out)?;
            } else if self.authorize(&path)
                && let Ok(relative) = path.strip_prefix(&self.root)
            {
                out.push(relative.to_string_lossy().into_owned());
            }
        }
        Ok(())
    }
}

impl WorkspaceFiles for PathGuard {
    fn root(&self) -> &Path {
        &self.root
    }

    fn authorize(&self, path: &Path) -> bool {
        self.guarded(path).is_ok()
    }

    fn read_file(&self, path: &Path) -> Result<String, WorkspaceError> {
        let path = self.guarded(path)?;
        fs::read_to_string(&path).map_err(|source| WorkspaceError::Io { path, source })
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), WorkspaceError> {
        let path = self.guarded(path)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| WorkspaceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, content).map_err(|source| WorkspaceError::Io { path, source })
    }

    fn project_tree(&self) -> Result<Vec<String>, WorkspaceError> {
        let mut paths = Vec::new();
        self.collect(&self.root, &mut paths)?;
        paths.sort();
        Ok(paths)
    }
}

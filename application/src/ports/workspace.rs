//! Workspace filesystem port
//!
//! The only sanctioned path into the host filesystem. The adapter
//! (the path guard in the infrastructure layer) confines every access to
//! the configured workspace boundary.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by workspace file operations
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("access denied: {0} is outside the workspace boundary")]
    AccessDenied(PathBuf),

    #[error("io failure on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Sandboxed file access rooted at a single workspace boundary.
///
/// The boundary is fixed at construction and read-only shared
/// configuration thereafter; no component mutates it.
pub trait WorkspaceFiles: Send + Sync {
    /// The canonical workspace root.
    fn root(&self) -> &Path;

    /// Whether the canonical absolute form of `path` lies within the
    /// workspace boundary. Denials are logged, never thrown.
    fn authorize(&self, path: &Path) -> bool;

    /// Read a file inside the boundary.
    fn read_file(&self, path: &Path) -> Result<String, WorkspaceError>;

    /// Write a file inside the boundary, creating the parent directory
    /// chain first when necessary.
    fn write_file(&self, path: &Path, content: &str) -> Result<(), WorkspaceError>;

    /// Sorted workspace-relative paths of the project, excluding
    /// dot-prefixed directories and unauthorized entries.
    fn project_tree(&self) -> Result<Vec<String>, WorkspaceError>;
}

//! JSONL ledger sink.
//!
//! Appends each consolidated [`LedgerEntry`] as one JSON line. The sink
//! only ever touches a path the workspace guard authorizes, so ledger
//! persistence stays inside the sandbox.

use colony_application::{LedgerSink, WorkspaceFiles};
use colony_domain::LedgerEntry;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record
/// and on `Drop`; JSONL is append-only like the ledger it mirrors.
pub struct JsonlLedgerSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlLedgerSink {
    /// Opens (appending) the sink file under the workspace boundary.
    ///
    /// Returns `None` when the guard denies the path or the file cannot
    /// be opened; the caller runs without persistence in that case.
    pub fn new(workspace: &dyn WorkspaceFiles, path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            workspace.root().join(path)
        };

        if !workspace.authorize(&path) {
            return None;
        }

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create ledger directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open ledger file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    /// Get the path to the sink file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerSink for JsonlLedgerSink {
    fn record(&self, entry: &LedgerEntry) {
        let Ok(line) = serde_json::to_string(entry) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlLedgerSink {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::path_guard::PathGuard;

    #[test]
    fn test_records_one_json_line_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let guard = PathGuard::new(dir.path()).unwrap();
        let sink = JsonlLedgerSink::new(&guard, "ledger/outcomes.jsonl").unwrap();

        sink.record(&LedgerEntry::new("first", "distributed", true));
        sink.record(&LedgerEntry::new("second", "error", false));

        let content = std::fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["task"], "first");
        assert_eq!(first["succeeded"], true);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["outcome"], "error");
    }

    #[test]
    fn test_denied_path_yields_no_sink() {
        let dir = tempfile::tempdir().unwrap();
        let guard = PathGuard::new(dir.path()).unwrap();

        assert!(JsonlLedgerSink::new(&guard, "../outside.jsonl").is_none());
    }
}

//! Knowledge ledger - append-only outcome history across cycles.
//!
//! The ledger never edits or removes entries; its length is a
//! monotonically non-decreasing counter for the life of the process.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One consolidated outcome, appended after a cycle iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Short summary of the task that was driven through the hierarchy
    pub task: String,
    /// Outcome label (e.g. `distributed`, `error`)
    pub outcome: String,
    /// Whether the iteration succeeded end to end
    pub succeeded: bool,
    /// When the entry was consolidated
    pub recorded_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(task: impl Into<String>, outcome: impl Into<String>, succeeded: bool) -> Self {
        Self {
            task: task.into(),
            outcome: outcome.into(),
            succeeded,
            recorded_at: Utc::now(),
        }
    }
}

/// Append-only record of outcomes, queryable in insertion order.
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry. Well-formed entries are never rejected.
    pub fn append(&mut self, entry: LedgerEntry) {
        self.entries.push(entry);
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

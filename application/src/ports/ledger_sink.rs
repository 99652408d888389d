//! Ledger persistence port
//!
//! Fire-and-forget hook invoked after each consolidation. Persistence
//! failures never disturb the in-memory ledger or the cycle.

use colony_domain::LedgerEntry;

/// Receives every consolidated entry.
pub trait LedgerSink: Send + Sync {
    fn record(&self, entry: &LedgerEntry);
}

/// No-op sink for running without persistence.
pub struct NoSink;

impl LedgerSink for NoSink {
    fn record(&self, _entry: &LedgerEntry) {}
}

//! Knowledge curator - consolidates cycle outcomes into the ledger.

use crate::ports::ledger_sink::{LedgerSink, NoSink};
use colony_domain::{Ledger, LedgerEntry};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Thread-safe owner of the append-only ledger.
///
/// The mutex enforces the single-writer-at-a-time discipline; reads are
/// safe to interleave with appends. An optional sink receives every
/// entry for persistence.
pub struct KnowledgeCurator {
    ledger: Mutex<Ledger>,
    sink: Arc<dyn LedgerSink>,
}

impl KnowledgeCurator {
    pub fn new() -> Self {
        Self {
            ledger: Mutex::new(Ledger::new()),
            sink: Arc::new(NoSink),
        }
    }

    /// Attaches a persistence sink (builder style).
    pub fn with_sink(mut self, sink: Arc<dyn LedgerSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Appends one consolidated outcome. Well-formed entries are never
    /// rejected and never removed afterwards.
    pub fn log_success(&self, entry: LedgerEntry) {
        debug!(task = %entry.task, outcome = %entry.outcome, "consolidating outcome");
        {
            let mut ledger = self.ledger.lock().expect("ledger mutex poisoned");
            ledger.append(entry.clone());
        }
        self.sink.record(&entry);
    }

    /// All entries in insertion order.
    pub fn consolidated(&self) -> Vec<LedgerEntry> {
        self.ledger
            .lock()
            .expect("ledger mutex poisoned")
            .entries()
            .to_vec()
    }

    pub fn len(&self) -> usize {
        self.ledger.lock().expect("ledger mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for KnowledgeCurator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink(AtomicUsize);

    impl LedgerSink for CountingSink {
        fn record(&self, _entry: &LedgerEntry) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_len_equals_log_calls() {
        let curator = KnowledgeCurator::new();
        assert!(curator.is_empty());

        for i in 0..4 {
            curator.log_success(LedgerEntry::new(format!("t{i}"), "distributed", true));
        }
        assert_eq!(curator.len(), 4);
        assert_eq!(curator.consolidated().len(), 4);
    }

    #[test]
    fn test_sink_receives_every_entry() {
        let sink = Arc::new(CountingSink(AtomicUsize::new(0)));
        let curator = KnowledgeCurator::new().with_sink(sink.clone());

        curator.log_success(LedgerEntry::new("a", "distributed", true));
        curator.log_success(LedgerEntry::new("b", "error", false));

        assert_eq!(sink.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_appends_serialize() {
        let curator = Arc::new(KnowledgeCurator::new());
        let mut handles = Vec::new();

        for t in 0..8 {
            let curator = Arc::clone(&curator);
            handles.push(std::thread::spawn(move || {
                for i in 0..25 {
                    curator.log_success(LedgerEntry::new(
                        format!("thread-{t}-{i}"),
                        "distributed",
                        true,
                    ));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(curator.len(), 200);
    }
}

//! Ledger persistence adapters.

pub mod jsonl_sink;

//! Infrastructure layer for colony
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the path guard confining all filesystem access,
//! the model gateway registry with its echo fallback, configuration file
//! loading, and JSONL ledger persistence.

pub mod config;
pub mod fs;
pub mod gateway;
pub mod ledger;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use fs::path_guard::PathGuard;
pub use gateway::{echo::EchoGateway, registry::ModelRegistry};
pub use ledger::jsonl_sink::JsonlLedgerSink;

//! Use cases - the orchestrator and its cycle driver.

pub mod run_cycle;

//! Application layer for colony
//!
//! This crate contains the port definitions, the agent hierarchy, the
//! knowledge curator, and the orchestrator that drives the repeating
//! plan→dispatch→consolidate cycle. It depends only on the domain layer.

pub mod agents;
pub mod config;
pub mod curator;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use agents::{
    dispatcher::DispatcherAgent,
    planner::{PlannerAgent, ARCHITECTURE_PLAN},
    worker::WorkerAgent,
    Agent,
};
pub use config::{CycleSettings, DEFAULT_SPECIALTIES};
pub use curator::KnowledgeCurator;
pub use ports::{
    ledger_sink::{LedgerSink, NoSink},
    model_gateway::{GatewayError, GatewayRegistry, GenerationOptions, ModelGateway},
    workspace::{WorkspaceError, WorkspaceFiles},
};
pub use use_cases::run_cycle::Orchestrator;

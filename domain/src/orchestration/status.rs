//! Read-only status snapshot published to presentation layers.

use crate::orchestration::state::CycleState;
use serde::{Deserialize, Serialize};

/// Point-in-time view of the ecosystem, built atomically by the
/// orchestrator. Consumers never observe partially-updated fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// A cycle session is live (running or paused)
    pub running: bool,
    /// The live session is paused
    pub paused: bool,
    /// Agents currently inside an execution
    pub agents_active: usize,
    /// Tasks completed across all agents
    pub tasks_completed: u64,
    /// Errors absorbed across all agents
    pub errors: u64,
    /// Number of consolidated ledger entries
    pub ledger_size: usize,
    /// Scheduler state label
    pub state: CycleState,
}

impl StatusSnapshot {
    /// The snapshot before any session has started.
    pub fn idle() -> Self {
        Self {
            running: false,
            paused: false,
            agents_active: 0,
            tasks_completed: 0,
            errors: 0,
            ledger_size: 0,
            state: CycleState::Idle,
        }
    }
}

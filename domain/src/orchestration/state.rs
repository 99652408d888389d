//! Cycle state machine.
//!
//! `Idle → Running ⇄ Paused → Completed`, with
//! `Running | Paused → ShuttingDown → Completed` on explicit termination.

use serde::{Deserialize, Serialize};

/// State of the cycle scheduler. Owned exclusively by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleState {
    /// No cycle session has started yet
    Idle,
    /// The cycle body is advancing
    Running,
    /// The session is live but the cycle body does not advance
    Paused,
    /// The session ended, normally or by termination
    Completed,
    /// Termination observed, final transition to `Completed` pending
    ShuttingDown,
}

impl CycleState {
    pub fn as_str(&self) -> &str {
        match self {
            CycleState::Idle => "idle",
            CycleState::Running => "running",
            CycleState::Paused => "paused",
            CycleState::Completed => "completed",
            CycleState::ShuttingDown => "shutting_down",
        }
    }

    /// `start()` is valid only from `Idle` or `Completed`; anywhere else
    /// it is a no-op.
    pub fn accepts_start(&self) -> bool {
        matches!(self, CycleState::Idle | CycleState::Completed)
    }

    /// A live session: started and not yet terminated. Pausing does not
    /// end the session.
    pub fn is_live(&self) -> bool {
        matches!(self, CycleState::Running | CycleState::Paused)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, CycleState::Paused)
    }
}

impl std::fmt::Display for CycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_start_only_when_idle_or_completed() {
        assert!(CycleState::Idle.accepts_start());
        assert!(CycleState::Completed.accepts_start());
        assert!(!CycleState::Running.accepts_start());
        assert!(!CycleState::Paused.accepts_start());
        assert!(!CycleState::ShuttingDown.accepts_start());
    }

    #[test]
    fn test_live_states() {
        assert!(CycleState::Running.is_live());
        assert!(CycleState::Paused.is_live());
        assert!(!CycleState::Idle.is_live());
        assert!(!CycleState::Completed.is_live());
        assert!(CycleState::Paused.is_paused());
        assert!(!CycleState::Running.is_paused());
    }
}

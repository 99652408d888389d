//! Agent entities - identity and per-agent runtime state.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Position of an agent in the fixed-depth hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Produces and reviews structural plans
    Planner,
    /// Fans tasks out to the worker pool and aggregates results
    Dispatcher,
    /// Executes one specialty of work
    Worker,
}

impl AgentRole {
    pub fn as_str(&self) -> &str {
        match self {
            AgentRole::Planner => "planner",
            AgentRole::Dispatcher => "dispatcher",
            AgentRole::Worker => "worker",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stable identity of an agent instance, assigned at construction and
/// immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentIdentity {
    pub role: AgentRole,
    /// Worker specialty tag; `None` for the planner and dispatcher
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    /// Sequence number distinguishing instances of the same role
    pub sequence: u32,
}

impl AgentIdentity {
    pub fn new(role: AgentRole, specialty: Option<impl Into<String>>, sequence: u32) -> Self {
        Self {
            role,
            specialty: specialty.map(Into::into),
            sequence,
        }
    }

    /// The single planner instance.
    pub fn planner() -> Self {
        Self::new(AgentRole::Planner, None::<String>, 0)
    }

    /// The single dispatcher instance.
    pub fn dispatcher() -> Self {
        Self::new(AgentRole::Dispatcher, None::<String>, 0)
    }

    /// A worker instance with its specialty tag.
    pub fn worker(sequence: u32, specialty: impl Into<String>) -> Self {
        Self::new(AgentRole::Worker, Some(specialty), sequence)
    }
}

impl std::fmt::Display for AgentIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.specialty {
            Some(specialty) => write!(f, "{}-{}:{}", self.role, self.sequence, specialty),
            None => write!(f, "{}-{}", self.role, self.sequence),
        }
    }
}

/// Per-agent mutable runtime state.
///
/// Mutated only through the owning agent's own execution path; read by
/// the orchestrator for status reporting. `active` is true for the whole
/// duration of exactly one execution and false otherwise.
#[derive(Debug, Default)]
pub struct AgentRuntime {
    active: AtomicBool,
    tasks_completed: AtomicU64,
    errors: AtomicU64,
}

impl AgentRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the agent active for one execution. The returned guard
    /// clears the flag on every exit path.
    pub fn activate(&self) -> ActivationGuard<'_> {
        self.active.store(true, Ordering::SeqCst);
        ActivationGuard { runtime: self }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Folds one execution outcome into the counters.
    pub fn record(&self, errored: bool) {
        if errored {
            self.errors.fetch_add(1, Ordering::SeqCst);
        } else {
            self.tasks_completed.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn tasks_completed(&self) -> u64 {
        self.tasks_completed.load(Ordering::SeqCst)
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::SeqCst)
    }

    /// A point-in-time copy of the counters for reporting.
    pub fn snapshot(&self) -> RuntimeSnapshot {
        RuntimeSnapshot {
            active: self.is_active(),
            tasks_completed: self.tasks_completed(),
            errors: self.errors(),
        }
    }
}

/// Clears the owning agent's `active` flag when dropped.
pub struct ActivationGuard<'a> {
    runtime: &'a AgentRuntime,
}

impl Drop for ActivationGuard<'_> {
    fn drop(&mut self) {
        self.runtime.active.store(false, Ordering::SeqCst);
    }
}

/// Point-in-time copy of an agent's runtime counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeSnapshot {
    pub active: bool,
    pub tasks_completed: u64,
    pub errors: u64,
}

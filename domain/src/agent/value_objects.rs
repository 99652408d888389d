//! Agent value objects - immutable types flowing through the dispatch protocol.
//!
//! # Work units
//! - [`Task`] - A unit of work handed to exactly one agent invocation
//! - [`TaskKind`] - Tag identifying how a task must be handled
//!
//! # Outcomes
//! - [`TaskOutcome`] - How an agent invocation concluded
//! - [`AgentResult`] - Full record of one agent's execution of one task
//! - [`ArchitectureReview`] - Soundness verdict on a generated plan

use crate::agent::entities::AgentIdentity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tag identifying the handling a task requires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// Produce a structural plan for the next increment of work
    Plan,
    /// Fan the task out to the worker pool
    AssignTask,
    /// Fold operator feedback back into coordination state
    IntegrateFeedback,
    /// Any kind this system does not recognize
    Other(String),
}

impl TaskKind {
    pub fn as_str(&self) -> &str {
        match self {
            TaskKind::Plan => "plan",
            TaskKind::AssignTask => "assign_task",
            TaskKind::IntegrateFeedback => "integrate_feedback",
            TaskKind::Other(kind) => kind,
        }
    }

    /// Parse a kind tag. Unknown tags become [`TaskKind::Other`] rather
    /// than an error; unrecognized kinds are a reportable outcome, not a
    /// failure.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "plan" => TaskKind::Plan,
            "assign_task" => TaskKind::AssignTask,
            "integrate_feedback" => TaskKind::IntegrateFeedback,
            other => TaskKind::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A unit of work. Immutable once built; created by the orchestrator or
/// the dispatcher and consumed by exactly one agent invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Required handling
    pub kind: TaskKind,
    /// Free-text description of the work
    pub description: String,
    /// Opaque key/value bag carried alongside the task
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub payload: HashMap<String, serde_json::Value>,
}

impl Task {
    /// Creates a task with an empty payload.
    pub fn new(kind: TaskKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            payload: HashMap::new(),
        }
    }

    /// Adds one payload entry (builder style).
    pub fn with_payload(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    /// Returns a payload value as a string slice, if present and textual.
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(|v| v.as_str())
    }
}

/// How one agent invocation concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOutcome {
    /// The agent produced its output
    Completed,
    /// The dispatcher fanned the task out and collected worker results
    Distributed,
    /// Fixed acknowledgement of a feedback-integration task
    Acknowledged,
    /// The task kind is not one this agent handles. Explicitly not an
    /// error; callers report it and move on.
    Unrecognized,
    /// The agent's backing capability failed
    Error,
}

impl TaskOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            TaskOutcome::Completed => "completed",
            TaskOutcome::Distributed => "distributed",
            TaskOutcome::Acknowledged => "acknowledged",
            TaskOutcome::Unrecognized => "unrecognized",
            TaskOutcome::Error => "error",
        }
    }

    /// Only [`TaskOutcome::Error`] counts as a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, TaskOutcome::Error)
    }
}

impl std::fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one agent's execution of one task.
///
/// Created by the executing agent, owned thereafter by its caller, never
/// mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    /// The agent that produced this result
    pub agent: AgentIdentity,
    /// How the invocation concluded
    pub outcome: TaskOutcome,
    /// Generated text or aggregation summary
    pub output: String,
    /// Failure detail when `outcome` is `Error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Label for typed outputs (e.g. `architecture_plan`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
    /// Fan-out children, in worker-registration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<AgentResult>,
}

impl AgentResult {
    /// A completed result carrying generated output.
    pub fn completed(agent: AgentIdentity, output: impl Into<String>) -> Self {
        Self {
            agent,
            outcome: TaskOutcome::Completed,
            output: output.into(),
            error: None,
            artifact: None,
            results: Vec::new(),
        }
    }

    /// A distributed result aggregating fan-out children.
    pub fn distributed(agent: AgentIdentity, results: Vec<AgentResult>) -> Self {
        let output = format!("distributed to {} workers", results.len());
        Self {
            agent,
            outcome: TaskOutcome::Distributed,
            output,
            error: None,
            artifact: None,
            results,
        }
    }

    /// The fixed acknowledgement outcome.
    pub fn acknowledged(agent: AgentIdentity, note: impl Into<String>) -> Self {
        Self {
            agent,
            outcome: TaskOutcome::Acknowledged,
            output: note.into(),
            error: None,
            artifact: None,
            results: Vec::new(),
        }
    }

    /// A labeled non-error result for a task kind the agent does not handle.
    pub fn unrecognized(agent: AgentIdentity, kind: &TaskKind) -> Self {
        Self {
            agent,
            outcome: TaskOutcome::Unrecognized,
            output: format!("unknown task kind: {}", kind),
            error: None,
            artifact: None,
            results: Vec::new(),
        }
    }

    /// A failed result. The error detail is kept alongside, never thrown.
    pub fn error(agent: AgentIdentity, detail: impl Into<String>) -> Self {
        Self {
            agent,
            outcome: TaskOutcome::Error,
            output: String::new(),
            error: Some(detail.into()),
            artifact: None,
            results: Vec::new(),
        }
    }

    /// Attaches an artifact label (builder style).
    pub fn with_artifact(mut self, artifact: impl Into<String>) -> Self {
        self.artifact = Some(artifact.into());
        self
    }

    /// Returns `true` unless this result, or any fan-out child, failed.
    pub fn is_success(&self) -> bool {
        !self.outcome.is_error() && self.results.iter().all(AgentResult::is_success)
    }
}

/// Soundness verdict on a generated plan.
///
/// `confidence` is always within `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureReview {
    pub valid: bool,
    pub confidence: f64,
}

impl ArchitectureReview {
    pub fn new(valid: bool, confidence: f64) -> Self {
        Self {
            valid,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

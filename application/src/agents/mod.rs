//! The agent hierarchy: one planner, one dispatcher, a pool of workers.
//!
//! All three roles share a single capability set, [`Agent`], so the
//! scheduler drives them uniformly without a class hierarchy.

pub mod dispatcher;
pub mod planner;
pub mod worker;

use async_trait::async_trait;
use colony_domain::{AgentIdentity, AgentResult, AgentRuntime, Task};
use tracing::debug;

/// Capability set shared by every agent in the hierarchy.
///
/// `run` is the sole externally invokable entry point; `execute` is the
/// role-specific body. No agent instance executes two tasks concurrently
/// through `run`.
#[async_trait]
pub trait Agent: Send + Sync {
    fn identity(&self) -> &AgentIdentity;

    fn runtime(&self) -> &AgentRuntime;

    /// Role-specific execution of one task. Implementations absorb
    /// backend failures into the returned result; they never propagate a
    /// raw error.
    async fn execute(&self, task: &Task) -> AgentResult;

    /// Wraps `execute` with runtime bracketing: the agent is marked
    /// active for exactly the duration of the call, and the outcome is
    /// folded into its counters on every exit path.
    async fn run(&self, task: &Task) -> AgentResult {
        debug!(agent = %self.identity(), kind = %task.kind, "executing task");
        let _active = self.runtime().activate();
        let result = self.execute(task).await;
        self.runtime().record(result.outcome.is_error());
        result
    }
}

//! Dispatcher agent - fans tasks out to the worker pool.

use crate::agents::worker::WorkerAgent;
use crate::agents::Agent;
use async_trait::async_trait;
use colony_domain::{AgentIdentity, AgentResult, AgentRuntime, Task, TaskKind};
use std::sync::Arc;
use tracing::debug;

/// The single coordinator between the planner and the worker pool.
pub struct DispatcherAgent {
    identity: AgentIdentity,
    runtime: AgentRuntime,
    workers: Vec<Arc<WorkerAgent>>,
}

impl DispatcherAgent {
    pub fn new(workers: Vec<Arc<WorkerAgent>>) -> Self {
        Self {
            identity: AgentIdentity::dispatcher(),
            runtime: AgentRuntime::new(),
            workers,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Fan-out: every worker sees the full task; results are collected
    /// in worker-registration order. Execution is sequential, so no
    /// worker ever runs two tasks at once.
    async fn assign(&self, task: &Task) -> AgentResult {
        debug!(agent = %self.identity, workers = self.workers.len(), "fanning out task");
        let mut results = Vec::with_capacity(self.workers.len());
        for worker in &self.workers {
            results.push(worker.run(task).await);
        }
        AgentResult::distributed(self.identity.clone(), results)
    }
}

#[async_trait]
impl Agent for DispatcherAgent {
    fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    fn runtime(&self) -> &AgentRuntime {
        &self.runtime
    }

    async fn execute(&self, task: &Task) -> AgentResult {
        match &task.kind {
            TaskKind::AssignTask => self.assign(task).await,
            TaskKind::IntegrateFeedback => {
                AgentResult::acknowledged(self.identity.clone(), "feedback integrated")
            }
            other => AgentResult::unrecognized(self.identity.clone(), other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticGateway;
    use colony_domain::{AgentRole, TaskOutcome};

    fn pool(specialties: &[&str]) -> Vec<Arc<WorkerAgent>> {
        specialties
            .iter()
            .enumerate()
            .map(|(i, specialty)| {
                Arc::new(WorkerAgent::new(
                    (i + 1) as u32,
                    *specialty,
                    Arc::new(StaticGateway::new(format!("out-{specialty}"))),
                ))
            })
            .collect()
    }

    #[tokio::test]
    async fn test_fan_out_preserves_registration_order() {
        let specialties = [
            "boilerplate",
            "logic_stubs",
            "debug_patch",
            "auto_test",
            "docs",
            "deep_logic",
        ];
        let dispatcher = DispatcherAgent::new(pool(&specialties));

        let result = dispatcher
            .run(&Task::new(TaskKind::AssignTask, "implement feature"))
            .await;

        assert_eq!(result.outcome, TaskOutcome::Distributed);
        assert_eq!(result.results.len(), 6);
        for (i, (child, specialty)) in result.results.iter().zip(specialties).enumerate() {
            assert_eq!(child.agent.role, AgentRole::Worker);
            assert_eq!(child.agent.sequence, (i + 1) as u32);
            assert_eq!(child.agent.specialty.as_deref(), Some(specialty));
            assert_eq!(child.output, format!("out-{specialty}"));
        }
    }

    #[tokio::test]
    async fn test_integrate_feedback_is_acknowledged_without_worker_effects() {
        let workers = pool(&["docs"]);
        let dispatcher = DispatcherAgent::new(workers.clone());

        let result = dispatcher
            .run(&Task::new(TaskKind::IntegrateFeedback, "operator notes"))
            .await;

        assert_eq!(result.outcome, TaskOutcome::Acknowledged);
        assert!(result.results.is_empty());
        assert_eq!(workers[0].runtime().tasks_completed(), 0);
    }

    #[tokio::test]
    async fn test_unknown_kind_reported_not_failed() {
        let dispatcher = DispatcherAgent::new(pool(&["docs"]));

        let result = dispatcher
            .run(&Task::new(TaskKind::parse("tangle"), "???"))
            .await;

        assert_eq!(result.outcome, TaskOutcome::Unrecognized);
        assert!(result.output.contains("tangle"));
        assert!(!result.outcome.is_error());
    }
}

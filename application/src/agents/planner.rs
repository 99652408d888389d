//! Planner agent - high-level planning and architecture review.

use crate::agents::Agent;
use crate::ports::model_gateway::{GenerationOptions, ModelGateway};
use async_trait::async_trait;
use colony_domain::{AgentIdentity, AgentResult, AgentRuntime, ArchitectureReview, Task, TaskKind};
use std::sync::Arc;
use tracing::warn;

/// Artifact label attached to generated plans.
pub const ARCHITECTURE_PLAN: &str = "architecture_plan";

/// The single strategic planner at the top of the hierarchy.
pub struct PlannerAgent {
    identity: AgentIdentity,
    runtime: AgentRuntime,
    gateway: Arc<dyn ModelGateway>,
}

impl PlannerAgent {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            identity: AgentIdentity::planner(),
            runtime: AgentRuntime::new(),
            gateway,
        }
    }

    /// Synchronous soundness check on a generated plan.
    ///
    /// Deterministic without a real analysis backend: an empty plan is
    /// unsound, anything else passes with fixed confidence.
    pub fn review_architecture(&self, plan: &str) -> ArchitectureReview {
        if plan.trim().is_empty() {
            ArchitectureReview::new(false, 0.0)
        } else {
            ArchitectureReview::new(true, 0.95)
        }
    }
}

#[async_trait]
impl Agent for PlannerAgent {
    fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    fn runtime(&self) -> &AgentRuntime {
        &self.runtime
    }

    async fn execute(&self, task: &Task) -> AgentResult {
        match &task.kind {
            TaskKind::Plan => {
                let prompt = format!(
                    "Role: chief architect of a hierarchical coding ecosystem.\n\
                     Task: {}\n\
                     Output: structured architecture plan.",
                    task.description
                );
                match self
                    .gateway
                    .generate(&prompt, &GenerationOptions::default())
                    .await
                {
                    Ok(plan) => AgentResult::completed(self.identity.clone(), plan)
                        .with_artifact(ARCHITECTURE_PLAN),
                    Err(e) => {
                        warn!(agent = %self.identity, error = %e, "planning failed");
                        AgentResult::error(self.identity.clone(), e.to_string())
                    }
                }
            }
            other => AgentResult::unrecognized(self.identity.clone(), other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingGateway, StaticGateway};
    use colony_domain::TaskOutcome;

    #[tokio::test]
    async fn test_plan_task_yields_labeled_plan() {
        let planner = PlannerAgent::new(Arc::new(StaticGateway::new("1. build the core")));

        let result = planner
            .run(&Task::new(TaskKind::Plan, "next increment"))
            .await;

        assert_eq!(result.outcome, TaskOutcome::Completed);
        assert_eq!(result.artifact.as_deref(), Some(ARCHITECTURE_PLAN));
        assert_eq!(result.output, "1. build the core");
    }

    #[tokio::test]
    async fn test_non_plan_kind_is_unrecognized() {
        let planner = PlannerAgent::new(Arc::new(StaticGateway::new("unused")));

        let result = planner
            .run(&Task::new(TaskKind::AssignTask, "not planner work"))
            .await;

        assert_eq!(result.outcome, TaskOutcome::Unrecognized);
        assert!(!result.outcome.is_error());
    }

    #[tokio::test]
    async fn test_backend_failure_absorbed() {
        let planner = PlannerAgent::new(Arc::new(FailingGateway));

        let result = planner.run(&Task::new(TaskKind::Plan, "anything")).await;

        assert_eq!(result.outcome, TaskOutcome::Error);
        assert_eq!(planner.runtime().errors(), 1);
    }

    #[test]
    fn test_review_shape_is_deterministic() {
        let planner = PlannerAgent::new(Arc::new(FailingGateway));

        let review = planner.review_architecture("a sound plan");
        assert!(review.valid);
        assert!((0.0..=1.0).contains(&review.confidence));

        let review = planner.review_architecture("   ");
        assert!(!review.valid);
        assert_eq!(review.confidence, 0.0);
    }
}

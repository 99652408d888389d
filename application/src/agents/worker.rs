//! Worker agent - executes one specialty of work through the gateway.

use crate::agents::Agent;
use crate::ports::model_gateway::{GenerationOptions, ModelGateway};
use async_trait::async_trait;
use colony_domain::{AgentIdentity, AgentResult, AgentRuntime, Task};
use std::sync::Arc;
use tracing::warn;

/// One specialized worker. Many instances exist, one per specialty; each
/// sees the full task on fan-out and derives its output from the gateway.
pub struct WorkerAgent {
    identity: AgentIdentity,
    runtime: AgentRuntime,
    specialty: String,
    gateway: Arc<dyn ModelGateway>,
}

impl WorkerAgent {
    pub fn new(sequence: u32, specialty: impl Into<String>, gateway: Arc<dyn ModelGateway>) -> Self {
        let specialty = specialty.into();
        Self {
            identity: AgentIdentity::worker(sequence, specialty.clone()),
            runtime: AgentRuntime::new(),
            specialty,
            gateway,
        }
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    fn prompt_for(&self, task: &Task) -> String {
        let mut prompt = format!(
            "Role: {} specialist in a hierarchical coding ecosystem.\nTask ({}): {}",
            self.specialty, task.kind, task.description
        );
        if let Some(plan) = task.payload_str("plan") {
            prompt.push_str("\nPlan context:\n");
            prompt.push_str(plan);
        }
        prompt
    }
}

#[async_trait]
impl Agent for WorkerAgent {
    fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    fn runtime(&self) -> &AgentRuntime {
        &self.runtime
    }

    async fn execute(&self, task: &Task) -> AgentResult {
        let prompt = self.prompt_for(task);
        match self
            .gateway
            .generate(&prompt, &GenerationOptions::default())
            .await
        {
            Ok(output) => AgentResult::completed(self.identity.clone(), output),
            Err(e) => {
                // Absorbed here so the dispatch loop never unwinds.
                warn!(agent = %self.identity, error = %e, "generation failed");
                AgentResult::error(self.identity.clone(), e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingGateway, StaticGateway};
    use colony_domain::{TaskKind, TaskOutcome};

    #[tokio::test]
    async fn test_prompt_incorporates_specialty_and_task() {
        let gateway = Arc::new(StaticGateway::new("generated"));
        let worker = WorkerAgent::new(4, "auto_test", gateway.clone());

        let task = Task::new(TaskKind::AssignTask, "cover the parser")
            .with_payload("plan", serde_json::json!("step one: tests"));
        let result = worker.run(&task).await;

        assert_eq!(result.outcome, TaskOutcome::Completed);
        assert_eq!(result.output, "generated");

        let prompts = gateway.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("auto_test"));
        assert!(prompts[0].contains("cover the parser"));
        assert!(prompts[0].contains("step one: tests"));
    }

    #[tokio::test]
    async fn test_gateway_failure_becomes_error_result() {
        let worker = WorkerAgent::new(2, "logic_stubs", Arc::new(FailingGateway));

        let result = worker
            .run(&Task::new(TaskKind::AssignTask, "anything"))
            .await;

        assert_eq!(result.outcome, TaskOutcome::Error);
        assert!(result.error.is_some());
        assert_eq!(worker.runtime().errors(), 1);
        assert_eq!(worker.runtime().tasks_completed(), 0);
        assert!(!worker.runtime().is_active());
    }
}

//! Live status ticker.
//!
//! A spawned refresh loop that redraws one spinner line from status
//! snapshots. It shares nothing with the cycle driver beyond the
//! orchestrator handle and ends within one interval of cancellation.

use colony_application::Orchestrator;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Periodic status display for a running cycle session.
pub struct StatusTicker {
    interval: Duration,
}

impl StatusTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
    }

    /// Spawns the refresh loop. The task ends when `token` is cancelled,
    /// which the orchestrator does on shutdown and on normal completion.
    pub fn spawn(
        &self,
        orchestrator: Arc<Orchestrator>,
        token: CancellationToken,
    ) -> JoinHandle<()> {
        let interval = self.interval;
        tokio::spawn(async move {
            let bar = ProgressBar::new_spinner();
            bar.set_style(Self::spinner_style());

            loop {
                let status = orchestrator.status();
                let mode = if status.paused {
                    "paused"
                } else if status.running {
                    "running"
                } else {
                    "stopped"
                };
                bar.set_message(format!(
                    "cycle {} | active {} | done {} | errors {} | ledger {}",
                    mode,
                    status.agents_active,
                    status.tasks_completed,
                    status.errors,
                    status.ledger_size
                ));
                bar.tick();

                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
            bar.finish_and_clear();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_application::{CycleSettings, KnowledgeCurator};

    struct EchoStub;

    #[async_trait::async_trait]
    impl colony_application::ModelGateway for EchoStub {
        async fn load(&self) -> Result<(), colony_application::GatewayError> {
            Ok(())
        }

        async fn generate(
            &self,
            prompt: &str,
            _options: &colony_application::GenerationOptions,
        ) -> Result<String, colony_application::GatewayError> {
            Ok(prompt.to_string())
        }
    }

    struct StubRegistry;

    impl colony_application::GatewayRegistry for StubRegistry {
        fn resolve(&self, _agent: &str) -> Arc<dyn colony_application::ModelGateway> {
            Arc::new(EchoStub)
        }
    }

    struct StubWorkspace;

    impl colony_application::WorkspaceFiles for StubWorkspace {
        fn root(&self) -> &std::path::Path {
            std::path::Path::new("/tmp")
        }

        fn authorize(&self, _path: &std::path::Path) -> bool {
            true
        }

        fn read_file(
            &self,
            path: &std::path::Path,
        ) -> Result<String, colony_application::WorkspaceError> {
            Err(colony_application::WorkspaceError::AccessDenied(
                path.to_path_buf(),
            ))
        }

        fn write_file(
            &self,
            _path: &std::path::Path,
            _content: &str,
        ) -> Result<(), colony_application::WorkspaceError> {
            Ok(())
        }

        fn project_tree(&self) -> Result<Vec<String>, colony_application::WorkspaceError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_ticker_ends_on_cancellation() {
        let orchestrator = Orchestrator::new(
            CycleSettings::default(),
            &StubRegistry,
            Arc::new(StubWorkspace),
            Arc::new(KnowledgeCurator::new()),
        );

        let token = CancellationToken::new();
        let handle = StatusTicker::new(Duration::from_millis(10))
            .spawn(orchestrator, token.clone());

        tokio::time::sleep(Duration::from_millis(30)).await;
        token.cancel();
        tokio::time::timeout(Duration::from_millis(200), handle)
            .await
            .expect("ticker should end within one interval")
            .unwrap();
    }
}

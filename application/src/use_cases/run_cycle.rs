//! The orchestrator - owns the agent hierarchy and drives the cycle.
//!
//! One cycle iteration is plan → dispatch → consolidate: the planner
//! drafts an increment, the dispatcher fans it out to the worker pool,
//! and the curator appends the outcome to the ledger. The loop repeats
//! until the running-time budget is spent or the operator terminates.
//!
//! Two mutexes exist: the control state (state machine, budget, token)
//! and the curator's ledger. The control lock is never held across an
//! await, so status queries never block on the cycle body.

use crate::agents::dispatcher::DispatcherAgent;
use crate::agents::planner::PlannerAgent;
use crate::agents::worker::WorkerAgent;
use crate::agents::Agent;
use crate::config::CycleSettings;
use crate::curator::KnowledgeCurator;
use crate::ports::model_gateway::GatewayRegistry;
use crate::ports::workspace::{WorkspaceError, WorkspaceFiles};
use colony_domain::{
    AgentRuntime, CycleState, LedgerEntry, RunBudget, StatusSnapshot, Task, TaskKind,
};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Mutable scheduler state, guarded by one mutex.
struct ControlState {
    state: CycleState,
    budget: RunBudget,
    /// Start of the currently open running segment; `None` while not running
    resumed_at: Option<Instant>,
    /// Cancelled to stop the driver and any presentation loop
    token: CancellationToken,
}

impl ControlState {
    /// Closes the open running segment into the budget.
    fn close_segment(&mut self) {
        if let Some(resumed_at) = self.resumed_at.take() {
            self.budget.accrue(resumed_at.elapsed());
        }
    }

    fn open_segment(&self) -> Duration {
        self.resumed_at.map(|t| t.elapsed()).unwrap_or_default()
    }
}

/// What the driver should do next at an iteration boundary.
enum Gate {
    Run,
    Hold,
    Finished,
}

/// Central control unit of the ecosystem.
///
/// Owns every agent, the curator, and the workspace port; publishes
/// status snapshots and the project listing to presentation layers.
pub struct Orchestrator {
    settings: CycleSettings,
    planner: Arc<PlannerAgent>,
    dispatcher: Arc<DispatcherAgent>,
    workers: Vec<Arc<WorkerAgent>>,
    curator: Arc<KnowledgeCurator>,
    workspace: Arc<dyn WorkspaceFiles>,
    control: Mutex<ControlState>,
}

impl Orchestrator {
    /// Assembles the hierarchy in dependency order: gateways are
    /// resolved per agent name, workers come first, then the dispatcher
    /// over the worker pool, then the planner.
    pub fn new(
        settings: CycleSettings,
        registry: &dyn GatewayRegistry,
        workspace: Arc<dyn WorkspaceFiles>,
        curator: Arc<KnowledgeCurator>,
    ) -> Arc<Self> {
        info!(
            root = %workspace.root().display(),
            workers = settings.worker_specialties.len(),
            "assembling agent hierarchy"
        );

        let mut workers = Vec::with_capacity(settings.worker_specialties.len());
        for (index, specialty) in settings.worker_specialties.iter().enumerate() {
            let sequence = (index + 1) as u32;
            let gateway = registry.resolve(&format!("worker-{sequence}"));
            workers.push(Arc::new(WorkerAgent::new(
                sequence,
                specialty.clone(),
                gateway,
            )));
        }

        let dispatcher = Arc::new(DispatcherAgent::new(workers.clone()));
        let planner = Arc::new(PlannerAgent::new(registry.resolve("planner")));

        let budget = RunBudget::new(settings.cycle_duration);
        Arc::new(Self {
            settings,
            planner,
            dispatcher,
            workers,
            curator,
            workspace,
            control: Mutex::new(ControlState {
                state: CycleState::Idle,
                budget,
                resumed_at: None,
                token: CancellationToken::new(),
            }),
        })
    }

    fn control(&self) -> MutexGuard<'_, ControlState> {
        self.control.lock().expect("control mutex poisoned")
    }

    /// Starts a cycle session. Valid from `Idle` or `Completed`; a
    /// no-op while a session is already live.
    pub fn start(self: &Arc<Self>) {
        let token = {
            let mut control = self.control();
            if !control.state.accepts_start() {
                debug!(state = %control.state, "start ignored, session already live");
                return;
            }
            control.state = CycleState::Running;
            control.budget = RunBudget::new(self.settings.cycle_duration);
            control.resumed_at = Some(Instant::now());
            control.token = CancellationToken::new();
            control.token.clone()
        };

        info!(duration = ?self.settings.cycle_duration, "cycle session started");
        let driver = Arc::clone(self);
        tokio::spawn(async move { driver.drive(token).await });
    }

    /// Toggles between running and paused. Takes effect at the next
    /// iteration boundary; an in-flight agent execution completes.
    pub fn pause(&self) {
        let mut control = self.control();
        match control.state {
            CycleState::Running => {
                control.close_segment();
                control.state = CycleState::Paused;
                info!("cycle paused");
            }
            CycleState::Paused => {
                control.resumed_at = Some(Instant::now());
                control.state = CycleState::Running;
                info!("cycle resumed");
            }
            state => debug!(%state, "pause ignored, no live session"),
        }
    }

    /// Resumes a paused session; a no-op otherwise.
    pub fn resume(&self) {
        let mut control = self.control();
        if control.state.is_paused() {
            control.resumed_at = Some(Instant::now());
            control.state = CycleState::Running;
            info!("cycle resumed");
        }
    }

    /// Terminates the session from any state. Idempotent. The driver
    /// and any presentation loop observe the cancellation within one
    /// polling interval.
    pub fn shutdown(&self) {
        let mut control = self.control();
        if control.state == CycleState::Completed {
            control.token.cancel();
            return;
        }
        control.state = CycleState::ShuttingDown;
        control.close_segment();
        control.token.cancel();
        control.state = CycleState::Completed;
        drop(control);
        info!("orchestrator shut down");
    }

    /// Consistent point-in-time snapshot. Never blocks on the cycle
    /// body; the control lock is only ever held briefly.
    pub fn status(&self) -> StatusSnapshot {
        let control = self.control();
        let mut agents_active = 0;
        let mut tasks_completed = 0;
        let mut errors = 0;
        for runtime in self.runtimes() {
            let snapshot = runtime.snapshot();
            if snapshot.active {
                agents_active += 1;
            }
            tasks_completed += snapshot.tasks_completed;
            errors += snapshot.errors;
        }
        StatusSnapshot {
            running: control.state.is_live(),
            paused: control.state.is_paused(),
            agents_active,
            tasks_completed,
            errors,
            ledger_size: self.curator.len(),
            state: control.state,
        }
    }

    /// Workspace-relative project listing, boundary-filtered.
    pub fn project_tree(&self) -> Result<Vec<String>, WorkspaceError> {
        self.workspace.project_tree()
    }

    /// Consolidated knowledge in insertion order.
    pub fn consolidated_knowledge(&self) -> Vec<LedgerEntry> {
        self.curator.consolidated()
    }

    /// Token cancelled when the current session terminates; presentation
    /// refresh loops select on this.
    pub fn shutdown_signal(&self) -> CancellationToken {
        self.control().token.clone()
    }

    fn runtimes(&self) -> impl Iterator<Item = &AgentRuntime> {
        std::iter::once(self.planner.runtime())
            .chain(std::iter::once(self.dispatcher.runtime()))
            .chain(self.workers.iter().map(|w| w.runtime()))
    }

    /// Decides, at an iteration boundary, whether to run, hold, or end.
    fn gate(&self) -> Gate {
        let control = self.control();
        match control.state {
            CycleState::Running => {
                if control.budget.exhausted(control.open_segment()) {
                    Gate::Finished
                } else {
                    Gate::Run
                }
            }
            CycleState::Paused => Gate::Hold,
            _ => Gate::Finished,
        }
    }

    /// Normal completion at budget exhaustion.
    fn complete(&self) {
        let mut control = self.control();
        if !control.state.is_live() {
            return;
        }
        control.close_segment();
        control.state = CycleState::Completed;
        control.token.cancel();
        drop(control);
        info!("cycle complete");
    }

    async fn drive(self: Arc<Self>, token: CancellationToken) {
        debug!("cycle driver started");
        loop {
            if token.is_cancelled() {
                break;
            }
            match self.gate() {
                Gate::Run => {}
                Gate::Hold => {
                    tokio::select! {
                        _ = token.cancelled() => break,
                        _ = tokio::time::sleep(self.settings.poll_interval) => {}
                    }
                    continue;
                }
                Gate::Finished => {
                    self.complete();
                    break;
                }
            }

            self.run_iteration().await;

            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(self.settings.pacing) => {}
            }
        }
        debug!("cycle driver stopped");
    }

    /// One full plan→dispatch→consolidate iteration. Per-task failures
    /// are recorded and the loop continues; only termination stops it.
    async fn run_iteration(&self) {
        let plan_task = Task::new(TaskKind::Plan, "draft the next architecture increment");
        let plan = self.planner.run(&plan_task).await;

        if plan.outcome.is_error() {
            warn!(agent = %plan.agent, error = ?plan.error, "planning failed, iteration recorded");
            self.curator.log_success(LedgerEntry::new(
                plan_task.description,
                plan.outcome.to_string(),
                false,
            ));
            return;
        }

        let review = self.planner.review_architecture(&plan.output);
        debug!(
            valid = review.valid,
            confidence = review.confidence,
            "architecture reviewed"
        );

        let work = Task::new(TaskKind::AssignTask, "implement the planned increment")
            .with_payload("plan", serde_json::Value::String(plan.output));
        let outcome = self.dispatcher.run(&work).await;

        let succeeded = review.valid && outcome.is_success();
        self.curator.log_success(LedgerEntry::new(
            work.description.clone(),
            outcome.outcome.to_string(),
            succeeded,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{OpenWorkspace, SingleGatewayRegistry, StaticGateway};
    use std::time::Duration;

    fn orchestrator(settings: CycleSettings) -> Arc<Orchestrator> {
        let registry =
            SingleGatewayRegistry::new(Arc::new(StaticGateway::new("a perfectly sound plan")));
        Orchestrator::new(
            settings,
            &registry,
            Arc::new(OpenWorkspace::new("/tmp/colony-test")),
            Arc::new(KnowledgeCurator::new()),
        )
    }

    fn quick_settings() -> CycleSettings {
        CycleSettings::default()
            .with_cycle_duration(Duration::from_millis(120))
            .with_pacing(Duration::from_millis(10))
            .with_poll_interval(Duration::from_millis(10))
            .with_worker_specialties(vec!["docs".to_string(), "auto_test".to_string()])
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_start_is_idempotent() {
        let orchestrator = orchestrator(quick_settings());
        orchestrator.start();
        orchestrator.start();

        let status = orchestrator.status();
        assert!(status.running);
        assert!(!status.paused);
        orchestrator.shutdown();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_pause_toggles_back_to_running() {
        let orchestrator = orchestrator(quick_settings());
        orchestrator.start();

        orchestrator.pause();
        assert!(orchestrator.status().paused);
        assert!(orchestrator.status().running);

        orchestrator.pause();
        let status = orchestrator.status();
        assert!(status.running);
        assert!(!status.paused);
        orchestrator.shutdown();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_shutdown_stops_iterations() {
        let orchestrator = orchestrator(quick_settings());
        orchestrator.start();
        tokio::time::sleep(Duration::from_millis(30)).await;

        orchestrator.shutdown();
        orchestrator.shutdown(); // idempotent

        let status = orchestrator.status();
        assert!(!status.running);
        assert_eq!(status.state, CycleState::Completed);

        // An iteration already in flight at shutdown may still consolidate;
        // let it drain before freezing the count.
        tokio::time::sleep(Duration::from_millis(30)).await;
        let frozen = orchestrator.status().ledger_size;
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(orchestrator.status().ledger_size, frozen);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_duration_expiry_completes_normally() {
        let orchestrator = orchestrator(quick_settings());
        orchestrator.start();

        tokio::time::sleep(Duration::from_millis(400)).await;
        let status = orchestrator.status();
        assert!(!status.running);
        assert_eq!(status.state, CycleState::Completed);
        assert!(status.ledger_size >= 1);
        assert_eq!(status.errors, 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_paused_time_excluded_from_budget() {
        let orchestrator = orchestrator(quick_settings());
        orchestrator.start();
        tokio::time::sleep(Duration::from_millis(20)).await;

        orchestrator.pause();
        // Far longer than the 120ms budget; none of it counts.
        tokio::time::sleep(Duration::from_millis(300)).await;
        let status = orchestrator.status();
        assert!(status.running, "paused session stays live");
        assert!(status.paused);

        orchestrator.resume();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(orchestrator.status().state, CycleState::Completed);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_restart_after_completion() {
        let orchestrator = orchestrator(quick_settings());
        orchestrator.start();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(orchestrator.status().state, CycleState::Completed);

        orchestrator.start();
        assert!(orchestrator.status().running);
        orchestrator.shutdown();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_iterations_consolidate_outcomes() {
        let orchestrator = orchestrator(quick_settings());
        orchestrator.start();
        tokio::time::sleep(Duration::from_millis(60)).await;
        orchestrator.shutdown();

        let entries = orchestrator.consolidated_knowledge();
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| e.succeeded));
        assert_eq!(entries[0].outcome, "distributed");
    }
}

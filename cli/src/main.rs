//! CLI entrypoint for colony
//!
//! This is the main binary that wires together all layers using
//! dependency injection: the path guard and gateway registry first, then
//! the curator, then the orchestrator over the agent hierarchy.

use anyhow::{Context, Result};
use clap::Parser;
use colony_application::{KnowledgeCurator, Orchestrator};
use colony_infrastructure::{ConfigLoader, EchoGateway, FileConfig, JsonlLedgerSink, ModelRegistry, PathGuard};
use colony_presentation::{Cli, CommandShell, StatusTicker};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Folds CLI overrides into the loaded file configuration.
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(workspace) = &cli.workspace {
        config.workspace.root = workspace.clone();
    }
    if let Some(duration) = cli.duration {
        config.cycle.duration_secs = duration;
    }
    if let Some(pacing) = cli.pacing {
        config.cycle.pacing_ms = pacing;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };
    apply_overrides(&mut config, &cli);
    config.validate().context("invalid configuration")?;

    info!("Starting colony");

    // === Dependency Injection ===
    // The guard needs an existing root; bootstrap it once here.
    std::fs::create_dir_all(&config.workspace.root).with_context(|| {
        format!(
            "failed to create workspace root {}",
            config.workspace.root.display()
        )
    })?;
    let workspace = Arc::new(PathGuard::new(&config.workspace.root)?);

    let mut registry = ModelRegistry::new();
    for (agent, backend) in &config.models.bindings {
        // The echo backend is the only one shipped; anything else falls
        // back to it at resolution time.
        if backend == "echo" {
            registry.register(agent.clone(), Arc::new(EchoGateway::new()));
        }
    }
    registry.load_all().await?;

    let mut curator = KnowledgeCurator::new();
    if let Some(ledger_path) = &config.ledger.path {
        match JsonlLedgerSink::new(workspace.as_ref(), ledger_path) {
            Some(sink) => {
                info!(path = %sink.path().display(), "ledger persistence enabled");
                curator = curator.with_sink(Arc::new(sink));
            }
            None => info!("ledger persistence disabled, sink unavailable"),
        }
    }

    let orchestrator = Orchestrator::new(
        config.cycle_settings(),
        &registry,
        workspace,
        Arc::new(curator),
    );

    let shell = CommandShell::new(Arc::clone(&orchestrator))
        .with_refresh(Duration::from_millis(config.cycle.status_refresh_ms))
        .with_ticker(!cli.quiet);

    if cli.start {
        orchestrator.start();
        if !cli.quiet {
            StatusTicker::new(Duration::from_millis(config.cycle.status_refresh_ms))
                .spawn(Arc::clone(&orchestrator), orchestrator.shutdown_signal());
        }
    }

    shell.run().await?;

    // The shell shuts the orchestrator down on exit; this covers error
    // paths out of the readline loop as well.
    orchestrator.shutdown();

    Ok(())
}

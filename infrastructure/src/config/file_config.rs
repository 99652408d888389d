//! Configuration file schema.

use colony_application::{CycleSettings, DEFAULT_SPECIALTIES};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Problems detected while validating a loaded configuration
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("cycle.duration_secs must be greater than zero")]
    ZeroDuration,

    #[error("workers.specialties must not be empty")]
    NoWorkers,
}

/// Root of the TOML configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub workspace: WorkspaceSection,
    pub cycle: CycleSection,
    pub workers: WorkersSection,
    pub models: ModelsSection,
    pub ledger: LedgerSection,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.cycle.duration_secs == 0 {
            return Err(ConfigValidationError::ZeroDuration);
        }
        if self.workers.specialties.is_empty() {
            return Err(ConfigValidationError::NoWorkers);
        }
        Ok(())
    }

    /// Maps the file schema onto orchestrator settings.
    pub fn cycle_settings(&self) -> CycleSettings {
        CycleSettings::default()
            .with_cycle_duration(Duration::from_secs(self.cycle.duration_secs))
            .with_pacing(Duration::from_millis(self.cycle.pacing_ms))
            .with_worker_specialties(self.workers.specialties.clone())
    }
}

/// `[workspace]` - the confinement boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSection {
    /// Root of the sandboxed subtree; created at startup if missing
    pub root: PathBuf,
}

impl Default for WorkspaceSection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("workspace"),
        }
    }
}

/// `[cycle]` - scheduler timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleSection {
    /// Running-time budget of one session, in seconds
    pub duration_secs: u64,
    /// Delay between cycle iterations, in milliseconds
    pub pacing_ms: u64,
    /// Status display refresh interval, in milliseconds
    pub status_refresh_ms: u64,
}

impl Default for CycleSection {
    fn default() -> Self {
        Self {
            duration_secs: 12 * 60 * 60,
            pacing_ms: 5_000,
            status_refresh_ms: 2_000,
        }
    }
}

/// `[workers]` - the specialty pool, in registration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkersSection {
    pub specialties: Vec<String>,
}

impl Default for WorkersSection {
    fn default() -> Self {
        Self {
            specialties: DEFAULT_SPECIALTIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// `[models]` - logical agent name → backend name bindings.
///
/// Names without a binding, and bindings to unknown backends, resolve to
/// the echo fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsSection {
    pub bindings: HashMap<String, String>,
}

/// `[ledger]` - optional persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSection {
    /// Workspace-relative JSONL file receiving every consolidated entry
    pub path: Option<PathBuf>,
}

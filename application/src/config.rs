//! Cycle settings - tunables for one orchestrator instance.

use std::time::Duration;

/// Default worker pool, one specialty per worker.
pub const DEFAULT_SPECIALTIES: [&str; 6] = [
    "boilerplate",
    "logic_stubs",
    "debug_patch",
    "auto_test",
    "docs",
    "deep_logic",
];

/// Tunables fixed at orchestrator construction.
#[derive(Debug, Clone)]
pub struct CycleSettings {
    /// Running-time budget of one cycle session
    pub cycle_duration: Duration,
    /// Delay between cycle iterations
    pub pacing: Duration,
    /// How often the driver re-checks pause and termination while held
    pub poll_interval: Duration,
    /// Worker pool specialties, in registration order
    pub worker_specialties: Vec<String>,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            cycle_duration: Duration::from_secs(12 * 60 * 60),
            pacing: Duration::from_secs(5),
            poll_interval: Duration::from_millis(200),
            worker_specialties: DEFAULT_SPECIALTIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl CycleSettings {
    pub fn with_cycle_duration(mut self, duration: Duration) -> Self {
        self.cycle_duration = duration;
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_worker_specialties(mut self, specialties: Vec<String>) -> Self {
        self.worker_specialties = specialties;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CycleSettings::default();
        assert_eq!(settings.cycle_duration, Duration::from_secs(43_200));
        assert_eq!(settings.worker_specialties.len(), 6);
        assert_eq!(settings.worker_specialties[0], "boilerplate");
    }

    #[test]
    fn test_builders() {
        let settings = CycleSettings::default()
            .with_cycle_duration(Duration::from_secs(60))
            .with_worker_specialties(vec!["docs".to_string()]);
        assert_eq!(settings.cycle_duration, Duration::from_secs(60));
        assert_eq!(settings.worker_specialties, vec!["docs"]);
    }
}

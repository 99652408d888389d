//! Running-time budget for one cycle session.
//!
//! The budget counts *running* time only: the scheduler accrues elapsed
//! time when a running segment ends (pause or termination) and checks the
//! accrued total plus the live segment against the limit. Paused time
//! never counts against the budget.

use std::time::Duration;

/// Time-box for one cycle session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBudget {
    limit: Duration,
    accrued: Duration,
}

impl RunBudget {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            accrued: Duration::ZERO,
        }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Running time accrued by closed segments.
    pub fn accrued(&self) -> Duration {
        self.accrued
    }

    /// Folds one closed running segment into the total.
    pub fn accrue(&mut self, segment: Duration) {
        self.accrued += segment;
    }

    /// Whether the budget is spent, given the still-open running segment.
    pub fn exhausted(&self, open_segment: Duration) -> bool {
        self.accrued + open_segment >= self.limit
    }

    /// Running time left, saturating at zero.
    pub fn remaining(&self, open_segment: Duration) -> Duration {
        self.limit.saturating_sub(self.accrued + open_segment)
    }
}

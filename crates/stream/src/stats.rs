use std::collections::VecDeque;
use std::time::Duration;

use wildreach_common::CellCoord;

/// Everything a single streaming tick did.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    /// Cells created this tick, nearest-first.
    pub created: Vec<CellCoord>,
    /// Cells destroyed this tick.
    pub destroyed: Vec<CellCoord>,
    /// In-range cells whose surface creation failed; retried next tick.
    pub failed: Vec<CellCoord>,
    /// In-range cells skipped because the resident cap was reached.
    pub skipped_for_cap: usize,
    /// Resident cells after the tick.
    pub resident: usize,
    /// Wall-clock duration of the tick.
    pub duration: Duration,
}

/// Scalar counters from the most recent tick, for instrumentation.
#[derive(Debug, Clone, Default)]
pub struct StreamStats {
    pub created_this_tick: usize,
    pub destroyed_this_tick: usize,
    pub failed_this_tick: usize,
    pub skipped_for_cap: usize,
    pub resident: usize,
    pub duration: Duration,
}

impl StreamStats {
    pub fn from_report(report: &TickReport) -> Self {
        Self {
            created_this_tick: report.created.len(),
            destroyed_this_tick: report.destroyed.len(),
            failed_this_tick: report.failed.len(),
            skipped_for_cap: report.skipped_for_cap,
            resident: report.resident,
            duration: report.duration,
        }
    }
}

/// Rolling window of recent tick durations.
#[derive(Debug)]
pub struct TickTimer {
    window: VecDeque<Duration>,
    capacity: usize,
}

impl TickTimer {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be positive");
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(dt);
    }

    pub fn count(&self) -> usize {
        self.window.len()
    }

    pub fn average(&self) -> Duration {
        if self.window.is_empty() {
            return Duration::ZERO;
        }
        self.window.iter().sum::<Duration>() / self.window.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.window.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.window.iter().copied().min().unwrap_or(Duration::ZERO)
    }
}

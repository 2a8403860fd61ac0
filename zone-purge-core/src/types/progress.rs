use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::utils::datetime;

/// Running tally used to derive progress snapshots.
///
/// Uses tokio's clock so paused-time tests see deterministic ETAs.
#[derive(Debug, Clone)]
pub struct BatchProgress {
    completed: usize,
    total: usize,
    started_at: Instant,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            completed: 0,
            total,
            started_at: Instant::now(),
        }
    }

    /// Count one more finished item and return the new snapshot.
    ///
    /// Never exceeds `total`.
    pub fn record_completion(&mut self) -> ProgressSnapshot {
        self.completed = (self.completed + 1).min(self.total);
        self.snapshot()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            completed: self.completed,
            total: self.total,
            eta: self.eta(),
        }
    }

    /// Estimated time remaining, from the average item time so far.
    pub fn eta(&self) -> Option<Duration> {
        self.eta_after(self.started_at.elapsed())
    }

    /// `elapsed / completed * remaining`; unknown before the first completion.
    fn eta_after(&self, elapsed: Duration) -> Option<Duration> {
        if self.completed == 0 {
            return None;
        }
        let completed = u32::try_from(self.completed).ok()?;
        let remaining = u32::try_from(self.total - self.completed).ok()?;
        Some(elapsed / completed * remaining)
    }
}

/// Point-in-time progress as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
    /// Estimated time remaining; `None` until the first item finishes
    #[serde(rename = "eta_seconds", with = "datetime::option_duration_secs")]
    pub eta: Option<Duration>,
}

impl ProgressSnapshot {
    /// ETA in whole seconds, `0` while unknown.
    pub fn eta_seconds(&self) -> u64 {
        self.eta.map_or(0, |d| d.as_secs())
    }

    /// Completed fraction in `0.0..=1.0`.
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.eta {
            Some(eta) => write!(
                f,
                "{}/{} completed. ETA: {}",
                self.completed,
                self.total,
                datetime::format_eta(eta)
            ),
            None => write!(f, "{}/{} completed.", self.completed, self.total),
        }
    }
}

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::utils::datetime;

/// Final result of processing one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum OperationOutcome {
    /// The zone existed and the API confirmed its deletion
    Deleted,
    /// No zone with exactly this name
    NotFound,
    /// The API answered but refused the deletion
    Failed(String),
    /// Transport, HTTP or unexpected failure
    Error(String),
    /// The batch was cancelled before this domain was reached
    Cancelled,
}

impl OperationOutcome {
    /// Whether this outcome should make the batch count as unsuccessful.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::Error(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Deleted => "deleted",
            Self::NotFound => "not_found",
            Self::Failed(_) => "failed",
            Self::Error(_) => "error",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OperationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted => f.write_str("deleted"),
            Self::NotFound => f.write_str("not found"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
            Self::Error(reason) => write!(f, "error: {reason}"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Outcome for a single domain, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    pub domain: String,
    /// Resolved zone id, when the lookup got that far
    pub zone_id: Option<String>,
    #[serde(flatten)]
    pub outcome: OperationOutcome,
}

/// Everything a batch produced: one item per input domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub items: Vec<ItemReport>,
    #[serde(with = "datetime::duration_secs")]
    pub elapsed: Duration,
    pub cancelled: bool,
}

impl BatchReport {
    fn count(&self, pred: impl Fn(&OperationOutcome) -> bool) -> usize {
        self.items.iter().filter(|item| pred(&item.outcome)).count()
    }

    pub fn deleted(&self) -> usize {
        self.count(|o| matches!(o, OperationOutcome::Deleted))
    }

    pub fn not_found(&self) -> usize {
        self.count(|o| matches!(o, OperationOutcome::NotFound))
    }

    pub fn failures(&self) -> usize {
        self.count(OperationOutcome::is_failure)
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, OperationOutcome::Cancelled))
    }

    /// No item ended in `Failed` or `Error`.
    pub fn is_clean(&self) -> bool {
        self.failures() == 0
    }

    /// One-line tally, e.g. `2 deleted, 1 not found, 0 failed`.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} deleted, {} not found, {} failed",
            self.deleted(),
            self.not_found(),
            self.failures()
        );
        if self.cancelled {
            line.push_str(&format!(", {} cancelled", self.skipped()));
        }
        line
    }
}

//! Sequential, paced batch deletion.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use zone_purge_provider::{ProviderError, ZoneProvider};

use crate::types::{
    BatchEvent, BatchProgress, BatchReport, BatchRequest, EventSink, ItemReport, OperationOutcome,
};

/// Minimum wall time per item, provider latency included.
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);

/// Deletes the zones of a batch one domain at a time.
///
/// Per item: lookup, then delete if found. Every failure is confined to its
/// item; the batch always runs to the end (or to cancellation) and reports
/// one outcome per input domain, in input order.
pub struct BatchDeleteService {
    provider: Arc<dyn ZoneProvider>,
    pacing: Duration,
}

impl BatchDeleteService {
    pub fn new(provider: Arc<dyn ZoneProvider>) -> Self {
        Self {
            provider,
            pacing: DEFAULT_PACING,
        }
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Process every domain of `request`, emitting events on `events`.
    ///
    /// Cancellation is checked between items and interrupts the pacing wait.
    /// Domains not reached are reported as [`OperationOutcome::Cancelled`].
    pub async fn run(
        &self,
        request: &BatchRequest,
        events: &EventSink,
        cancel: &CancellationToken,
    ) -> BatchReport {
        let total = request.len();
        let started = Instant::now();
        let mut progress = BatchProgress::new(total);
        let mut items = Vec::with_capacity(total);

        log::info!(
            "Batch started: {total} domain(s) via provider '{}'",
            self.provider.id()
        );
        events.log("Starting bulk deletion...");
        events.emit(BatchEvent::Progress(progress.snapshot()));

        for (i, domain) in request.domains().iter().enumerate() {
            if cancel.is_cancelled() {
                break;
            }
            let item_started = Instant::now();

            let item = AssertUnwindSafe(self.process_item(i + 1, total, domain, events))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    log::error!("Worker panicked while processing '{domain}'");
                    events.log("  - Unexpected error: worker panicked");
                    ItemReport {
                        domain: domain.clone(),
                        zone_id: None,
                        outcome: OperationOutcome::Error("worker panicked".to_string()),
                    }
                });

            events.emit(BatchEvent::Outcome(item.clone()));
            items.push(item);
            events.emit(BatchEvent::Progress(progress.record_completion()));

            self.pace(item_started, cancel).await;
        }

        let cancelled = items.len() < total;
        if cancelled {
            let skipped = &request.domains()[items.len()..];
            events.log(format!(
                "Cancelled. {} domain(s) not processed.",
                skipped.len()
            ));
            for domain in skipped {
                let item = ItemReport {
                    domain: domain.clone(),
                    zone_id: None,
                    outcome: OperationOutcome::Cancelled,
                };
                events.emit(BatchEvent::Outcome(item.clone()));
                items.push(item);
            }
        }

        events.log("All done.");
        let report = BatchReport {
            items,
            elapsed: started.elapsed(),
            cancelled,
        };
        log::info!("Batch finished in {:?}: {}", report.elapsed, report.summary());
        events.emit(BatchEvent::Finished(report.clone()));
        report
    }

    async fn process_item(
        &self,
        index: usize,
        total: usize,
        domain: &str,
        events: &EventSink,
    ) -> ItemReport {
        let report = |zone_id: Option<String>, outcome| ItemReport {
            domain: domain.to_string(),
            zone_id,
            outcome,
        };

        events.log(format!("[{index}/{total}] Looking up zone for '{domain}'..."));
        let zone = match self.provider.find_zone(domain).await {
            Ok(Some(zone)) => zone,
            Ok(None) => {
                events.log("  - Not found. Skipping.");
                return report(None, OperationOutcome::NotFound);
            }
            Err(e) => return report(None, Self::item_error(domain, &e, events)),
        };

        events.log(format!("  - Found zone id: {}. Deleting...", zone.id));
        let outcome = match self.provider.delete_zone(&zone.id).await {
            Ok(deletion) if deletion.success => {
                events.log("  - Deleted successfully.");
                OperationOutcome::Deleted
            }
            Ok(deletion) => {
                events.log(format!("  - Failed to delete: {}", deletion.message));
                OperationOutcome::Failed(deletion.message)
            }
            Err(e) => Self::item_error(domain, &e, events),
        };
        report(Some(zone.id), outcome)
    }

    fn item_error(domain: &str, e: &ProviderError, events: &EventSink) -> OperationOutcome {
        if e.is_expected() {
            log::warn!("[{domain}] {e}");
        } else {
            log::error!("[{domain}] {e}");
        }
        if e.is_api_error() {
            events.log(format!("  - API error: {e}"));
        } else {
            events.log(format!("  - Unexpected error: {e}"));
        }
        OperationOutcome::Error(e.to_string())
    }

    /// Sleep out the rest of the pacing floor, waking early on cancel.
    async fn pace(&self, item_started: Instant, cancel: &CancellationToken) {
        let Some(rest) = self.pacing.checked_sub(item_started.elapsed()) else {
            return;
        };
        if rest.is_zero() {
            return;
        }
        tokio::select! {
            () = tokio::time::sleep(rest) => {}
            () = cancel.cancelled() => {}
        }
    }
}

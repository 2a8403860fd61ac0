//! Single-flight background execution of batches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::BatchDeleteService;
use crate::error::{CoreError, CoreResult};
use crate::types::{BatchEvent, BatchReport, BatchRequest, EventSink};

/// Runs at most one batch at a time on a background task.
///
/// The caller stays responsive: it gets a [`BatchHandle`] immediately and
/// observes progress through its event stream.
#[derive(Clone)]
pub struct BatchRunner {
    service: Arc<BatchDeleteService>,
    busy: Arc<AtomicBool>,
}

/// Clears the busy flag however the worker ends.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl BatchRunner {
    pub fn new(service: BatchDeleteService) -> Self {
        Self {
            service: Arc::new(service),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Validate raw domains and start a batch.
    ///
    /// Validation errors are returned before anything is spawned.
    pub fn start_domains<I, S>(&self, domains: I) -> CoreResult<BatchHandle>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.start(BatchRequest::new(domains)?)
    }

    /// Start a batch on a new tokio task.
    ///
    /// Must be called from within a tokio runtime. Fails with
    /// [`CoreError::BatchInProgress`] while another batch is running.
    pub fn start(&self, request: BatchRequest) -> CoreResult<BatchHandle> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("Batch rejected: another batch is still running");
            return Err(CoreError::BatchInProgress);
        }
        let guard = BusyGuard(Arc::clone(&self.busy));

        let (sink, events) = EventSink::channel();
        let cancel = CancellationToken::new();
        let service = Arc::clone(&self.service);
        let token = cancel.clone();

        let join = tokio::spawn(async move {
            let _guard = guard;
            service.run(&request, &sink, &token).await
        });

        Ok(BatchHandle {
            events,
            cancel,
            join,
        })
    }
}

/// Caller side of a running batch.
#[derive(Debug)]
pub struct BatchHandle {
    /// Ordered event stream; closes after [`BatchEvent::Finished`]
    pub events: mpsc::UnboundedReceiver<BatchEvent>,
    cancel: CancellationToken,
    join: JoinHandle<BatchReport>,
}

impl BatchHandle {
    /// Request cancellation; takes effect between items.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token that cancels this batch when triggered.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub async fn next_event(&mut self) -> Option<BatchEvent> {
        self.events.recv().await
    }

    /// Wait for the worker and return its report.
    pub async fn wait(self) -> CoreResult<BatchReport> {
        self.join
            .await
            .map_err(|e| CoreError::WorkerFailed(e.to_string()))
    }
}

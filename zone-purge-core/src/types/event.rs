use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::sync::mpsc;

use super::{BatchReport, ItemReport, ProgressSnapshot};
use crate::utils::datetime;

/// A timestamped progress message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLine {
    pub at: DateTime<Local>,
    pub message: String,
}

impl LogLine {
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            at: Local::now(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", datetime::format_clock(&self.at), self.message)
    }
}

/// Notifications emitted by a running batch, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum BatchEvent {
    Log(LogLine),
    Progress(ProgressSnapshot),
    Outcome(ItemReport),
    /// Always the last event of a batch
    Finished(BatchReport),
}

/// Sending half of a batch's event stream.
///
/// A dropped receiver never aborts the batch; events are discarded instead.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<BatchEvent>,
}

impl EventSink {
    pub fn new(tx: mpsc::UnboundedSender<BatchEvent>) -> Self {
        Self { tx }
    }

    /// New sink plus the receiver that observes it.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<BatchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn emit(&self, event: BatchEvent) {
        if self.tx.send(event).is_err() {
            log::trace!("Batch event dropped: receiver closed");
        }
    }

    /// Emit a `Log` event and mirror it to the `log` facade.
    pub fn log(&self, message: impl Into<String>) {
        let line = LogLine::now(message);
        log::info!("{}", line.message);
        self.emit(BatchEvent::Log(line));
    }
}

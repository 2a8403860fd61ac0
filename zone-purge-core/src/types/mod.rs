//! 类型定义模块

mod batch;
mod event;
mod outcome;
mod progress;

pub use batch::{BatchRequest, MAX_BATCH_SIZE};
pub use event::{BatchEvent, EventSink, LogLine};
pub use outcome::{BatchReport, ItemReport, OperationOutcome};
pub use progress::{BatchProgress, ProgressSnapshot};

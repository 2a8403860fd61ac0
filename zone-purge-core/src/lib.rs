//! Zone Purge Core Library
//!
//! Batch orchestration for bulk zone deletion:
//! - Input normalization and batch validation (at most [`MAX_BATCH_SIZE`] domains)
//! - Sequential, paced deletion with per-item error isolation
//! - Progress, ETA and timestamped log events
//! - Single-flight background runner with cooperative cancellation
//!
//! The provider is injected as `Arc<dyn ZoneProvider>`, so tests run against mocks.

pub mod config;
pub mod error;
pub mod services;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::CredentialConfig;
pub use error::{CoreError, CoreResult};
pub use services::{
    BatchDeleteService, BatchHandle, BatchRunner, DEFAULT_PACING, normalize_domains, parse_domains,
};
pub use types::{
    BatchEvent, BatchProgress, BatchReport, BatchRequest, EventSink, ItemReport, LogLine,
    MAX_BATCH_SIZE, OperationOutcome, ProgressSnapshot,
};

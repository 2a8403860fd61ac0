//! 业务逻辑服务层

mod batch_delete_service;
mod batch_runner;
mod domain_input;

pub use batch_delete_service::{BatchDeleteService, DEFAULT_PACING};
pub use batch_runner::{BatchHandle, BatchRunner};
pub use domain_input::{normalize_domains, parse_domains};

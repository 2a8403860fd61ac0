use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::services::normalize_domains;

/// Hard cap on domains per batch.
pub const MAX_BATCH_SIZE: usize = 10;

/// A validated, de-duplicated list of domains to delete.
///
/// Constructing one is the only way into the orchestrator, so an oversized
/// or empty batch is rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRequest {
    domains: Vec<String>,
}

impl BatchRequest {
    /// Normalize and validate against [`MAX_BATCH_SIZE`].
    pub fn new<I, S>(domains: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_limit(domains, MAX_BATCH_SIZE)
    }

    /// Same as [`BatchRequest::new`] with a custom cap.
    pub fn with_limit<I, S>(domains: I, max: usize) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = normalize_domains(domains);
        if domains.is_empty() {
            return Err(CoreError::EmptyBatch);
        }
        if domains.len() > max {
            return Err(CoreError::TooManyDomains {
                count: domains.len(),
                max,
            });
        }
        Ok(Self { domains })
    }

    /// Domains in processing order.
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use zone_purge_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No domain survived input normalization
    #[error("No domains given")]
    EmptyBatch,

    /// More domains than a single batch may hold
    #[error("Too many domains: {count} given, at most {max} per batch")]
    TooManyDomains { count: usize, max: usize },

    /// Credentials or client settings are missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A batch is already running on this runner
    #[error("A batch is already running")]
    BatchInProgress,

    /// The background worker ended without producing a report
    #[error("Batch worker failed: {0}")]
    WorkerFailed(String),

    /// Provider error (transparently transmitted)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// 是否为预期行为（用户输入错误等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::EmptyBatch
            | Self::TooManyDomains { .. }
            | Self::Configuration(_)
            | Self::BatchInProgress => true,
            Self::Provider(e) => e.is_expected(),
            Self::WorkerFailed(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_many_domains_display() {
        let e = CoreError::TooManyDomains { count: 11, max: 10 };
        assert_eq!(
            e.to_string(),
            "Too many domains: 11 given, at most 10 per batch"
        );
    }

    #[test]
    fn provider_error_is_transparent() {
        let inner = ProviderError::NetworkError {
            provider: "cloudflare".to_string(),
            detail: "connection reset".to_string(),
        };
        let e = CoreError::from(inner.clone());
        assert_eq!(e.to_string(), inner.to_string());
        assert!(!e.is_expected());
    }

    #[test]
    fn user_errors_are_expected() {
        assert!(CoreError::EmptyBatch.is_expected());
        assert!(CoreError::BatchInProgress.is_expected());
        assert!(!CoreError::WorkerFailed("panicked".to_string()).is_expected());
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::TooManyDomains { count: 12, max: 10 })
            .expect("serialize");
        assert_eq!(json["code"], "TooManyDomains");
        assert_eq!(json["details"]["count"], 12);
    }
}

use serde::{Deserialize, Serialize};

/// Unified error type for zone provider operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// Only rate limiting (HTTP 429) is retried, and only inside the transport client.
/// Everything else surfaces to the caller on the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// The client could not be constructed (missing credentials, bad base URL, TLS setup).
    Configuration {
        /// Provider that produced the error.
        provider: String,
        /// What is wrong with the configuration.
        detail: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// HTTP 429 kept coming back after every allowed retry.
    RateLimitExceeded {
        /// Provider that produced the error.
        provider: String,
        /// HTTP method of the abandoned request.
        method: String,
        /// API path of the abandoned request.
        path: String,
        /// Number of retries performed before giving up.
        retries: u32,
    },

    /// The API answered with a non-success status, or with a body that could not be parsed.
    ApiError {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// HTTP method of the failed request.
        method: String,
        /// API path of the failed request.
        path: String,
        /// Error entries reported by the API, joined as `code: message; ...`.
        message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（客户端请求错误等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ApiError { status, .. } => (400..500).contains(status),
            Self::Configuration { .. }
            | Self::NetworkError { .. }
            | Self::Timeout { .. }
            | Self::RateLimitExceeded { .. } => false,
        }
    }

    /// Whether the provider itself reported the failure (as opposed to a local or network fault).
    #[must_use]
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            Self::ApiError { .. } | Self::RateLimitExceeded { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration { provider, detail } => {
                write!(f, "[{provider}] Configuration error: {detail}")
            }
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::RateLimitExceeded {
                provider,
                method,
                path,
                ..
            } => {
                write!(
                    f,
                    "[{provider}] Rate limited and max retries exceeded for {method} {path}"
                )
            }
            Self::ApiError {
                provider,
                status,
                method,
                path,
                message,
            } => {
                write!(f, "[{provider}] HTTP {status} for {method} {path}: {message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_configuration() {
        let e = ProviderError::Configuration {
            provider: "cloudflare".to_string(),
            detail: "no credentials".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[cloudflare] Configuration error: no credentials"
        );
    }

    #[test]
    fn display_network_error() {
        let e = ProviderError::NetworkError {
            provider: "test".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Network error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let e = ProviderError::Timeout {
            provider: "test".to_string(),
            detail: "30s elapsed".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Request timeout: 30s elapsed");
    }

    #[test]
    fn display_rate_limit_exceeded() {
        let e = ProviderError::RateLimitExceeded {
            provider: "cloudflare".to_string(),
            method: "GET".to_string(),
            path: "/zones".to_string(),
            retries: 5,
        };
        assert_eq!(
            e.to_string(),
            "[cloudflare] Rate limited and max retries exceeded for GET /zones"
        );
    }

    #[test]
    fn display_api_error() {
        let e = ProviderError::ApiError {
            provider: "cloudflare".to_string(),
            status: 403,
            method: "DELETE".to_string(),
            path: "/zones/abc".to_string(),
            message: "9109: Unauthorized to access requested resource".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[cloudflare] HTTP 403 for DELETE /zones/abc: 9109: Unauthorized to access requested resource"
        );
    }

    #[test]
    fn client_errors_are_expected() {
        let e = ProviderError::ApiError {
            provider: "test".to_string(),
            status: 404,
            method: "GET".to_string(),
            path: "/zones".to_string(),
            message: String::new(),
        };
        assert!(e.is_expected());
        assert!(e.is_api_error());
    }

    #[test]
    fn server_errors_are_not_expected() {
        let e = ProviderError::ApiError {
            provider: "test".to_string(),
            status: 502,
            method: "GET".to_string(),
            path: "/zones".to_string(),
            message: String::new(),
        };
        assert!(!e.is_expected());
    }

    #[test]
    fn network_error_is_not_api_error() {
        let e = ProviderError::NetworkError {
            provider: "test".to_string(),
            detail: "reset".to_string(),
        };
        assert!(!e.is_api_error());
        assert!(!e.is_expected());
    }

    #[test]
    fn serializes_with_code_tag() {
        let e = ProviderError::Timeout {
            provider: "cloudflare".to_string(),
            detail: "deadline".to_string(),
        };
        let json = serde_json::to_value(&e).expect("serialize");
        assert_eq!(json["code"], "Timeout");
        assert_eq!(json["provider"], "cloudflare");
    }
}

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::http_client::RateLimitPolicy;

/// Default Cloudflare API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// ============ Credentials ============

/// Provider credentials.
///
/// Exactly one authentication mode is used per client and it is fixed at construction.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    /// Scoped API token, sent as `Authorization: Bearer <token>`.
    Token { api_token: String },
    /// Global API key, sent as `X-Auth-Email` + `X-Auth-Key`.
    LegacyKeyPair { email: String, api_key: String },
}

impl Credentials {
    /// Pick the credential variant from optional raw values.
    ///
    /// A non-blank token wins. Otherwise both email and key must be non-blank.
    pub fn resolve(
        api_token: Option<String>,
        email: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self> {
        let non_blank = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        if let Some(api_token) = non_blank(api_token) {
            return Ok(Self::Token { api_token });
        }
        match (non_blank(email), non_blank(api_key)) {
            (Some(email), Some(api_key)) => Ok(Self::LegacyKeyPair { email, api_key }),
            _ => Err(ProviderError::Configuration {
                provider: "cloudflare".to_string(),
                detail: "credentials missing: provide an API token, or an account email together with an API key"
                    .to_string(),
            }),
        }
    }

    /// Authentication mode label, safe to log.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Token { .. } => "api_token",
            Self::LegacyKeyPair { .. } => "api_key",
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token { .. } => f
                .debug_struct("Token")
                .field("api_token", &"<redacted>")
                .finish(),
            Self::LegacyKeyPair { email, .. } => f
                .debug_struct("LegacyKeyPair")
                .field("email", email)
                .field("api_key", &"<redacted>")
                .finish(),
        }
    }
}

// ============ Client configuration ============

/// Transport settings, read-only after the client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// API base URL without trailing slash
    pub base_url: String,
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// TCP/TLS connect timeout
    pub connect_timeout: Duration,
    /// HTTP 429 retry limits
    pub rate_limit: RateLimitPolicy,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            rate_limit: RateLimitPolicy::default(),
        }
    }
}

impl ProviderConfig {
    /// Override the base URL (trailing slashes are dropped).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

// ============ Zones ============

/// A zone as known to the provider.
///
/// Fetched per lookup and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-assigned identifier
    pub id: String,
    /// Domain name as known to the provider
    pub name: String,
}

/// Result of a delete call whose HTTP status was 2xx.
///
/// The API may still refuse the deletion in the body, so `success` comes from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDeletion {
    pub success: bool,
    /// `"Deleted"` or the provider's reason
    pub message: String,
}

impl ZoneDeletion {
    pub fn deleted() -> Self {
        Self {
            success: true,
            message: "Deleted".to_string(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

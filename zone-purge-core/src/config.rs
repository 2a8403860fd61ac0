//! Credential and endpoint configuration from the environment.

use zone_purge_provider::{Credentials, ProviderConfig};

use crate::error::{CoreError, CoreResult};

pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
pub const ENV_EMAIL: &str = "CLOUDFLARE_EMAIL";
pub const ENV_API_KEY: &str = "CLOUDFLARE_API_KEY";
/// Optional base URL override, mainly for staging and local mocks
pub const ENV_API_BASE_URL: &str = "CLOUDFLARE_API_BASE_URL";

/// Resolved credentials plus optional endpoint override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialConfig {
    pub credentials: Credentials,
    pub base_url: Option<String>,
}

impl CredentialConfig {
    /// Read from the process environment.
    ///
    /// Loading a `.env` file is the caller's job and must happen first.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CoreResult<Self> {
        let credentials = Credentials::resolve(
            lookup(ENV_API_TOKEN),
            lookup(ENV_EMAIL),
            lookup(ENV_API_KEY),
        )
        .map_err(|_| {
            CoreError::Configuration(format!(
                "missing Cloudflare credentials: set {ENV_API_TOKEN}, or both {ENV_EMAIL} and {ENV_API_KEY}"
            ))
        })?;

        let base_url = lookup(ENV_API_BASE_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        log::debug!(
            "Credentials loaded (mode: {}, custom base url: {})",
            credentials.mode(),
            base_url.is_some()
        );
        Ok(Self {
            credentials,
            base_url,
        })
    }

    /// Apply the base URL override, if any, to `config`.
    #[must_use]
    pub fn apply(&self, config: ProviderConfig) -> ProviderConfig {
        match &self.base_url {
            Some(url) => config.with_base_url(url.as_str()),
            None => config,
        }
    }
}

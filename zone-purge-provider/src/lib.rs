//! # zone-purge-provider
//!
//! Cloudflare zone client used by the bulk zone deletion tool.
//!
//! It resolves domain names to zone identifiers, deletes zones, and keeps
//! the remote API happy while doing so:
//!
//! - **Authentication**: API token (`Authorization: Bearer`) or legacy
//!   `X-Auth-Email` + `X-Auth-Key`, chosen once per client.
//! - **Rate limiting**: HTTP 429 is retried with `Retry-After` or exponential
//!   backoff (1s doubling, capped at 30s, 5 retries), then fails with
//!   [`ProviderError::RateLimitExceeded`].
//! - **Errors**: every other non-2xx status fails immediately with
//!   [`ProviderError::ApiError`] carrying status, method, path and the joined
//!   provider messages.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use zone_purge_provider::{create_provider, Credentials, ProviderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::resolve(Some("your-token".to_string()), None, None)?;
//!     let provider = create_provider(credentials, ProviderConfig::default())?;
//!
//!     if let Some(zone) = provider.find_zone("example.com").await? {
//!         let deletion = provider.delete_zone(&zone.id).await?;
//!         println!("{}: {}", zone.name, deletion.message);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! A zone that does not exist is `Ok(None)`, and a deletion refused inside a
//! 2xx body is `Ok(ZoneDeletion { success: false, .. })`. Neither is an error.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory function
pub use factory::create_provider;

// Re-export HTTP retry policy
pub use http_client::{RateLimitBackoff, RateLimitPolicy};

// Re-export core trait only (internal traits are not exported)
pub use traits::ZoneProvider;

// Re-export types
pub use types::{
    Credentials, DEFAULT_API_BASE, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT,
    ProviderConfig, Zone, ZoneDeletion,
};

// Re-export concrete provider and shared helpers
pub use providers::CloudflareProvider;
pub use providers::common::normalize_domain_name;

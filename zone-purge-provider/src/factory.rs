//! Provider factory function.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::CloudflareProvider;
use crate::traits::ZoneProvider;
use crate::types::{Credentials, ProviderConfig};

/// Creates a [`ZoneProvider`] from credentials and transport settings.
///
/// The returned provider is wrapped in `Arc<dyn ZoneProvider>` so it can be handed
/// to a background worker.
///
/// # Examples
///
/// ```rust,no_run
/// use zone_purge_provider::{create_provider, Credentials, ProviderConfig};
///
/// let provider = create_provider(
///     Credentials::Token { api_token: "your-token".to_string() },
///     ProviderConfig::default(),
/// ).unwrap();
/// ```
pub fn create_provider(
    credentials: Credentials,
    config: ProviderConfig,
) -> Result<Arc<dyn ZoneProvider>> {
    Ok(Arc::new(CloudflareProvider::new(credentials, config)?))
}

//! Cloudflare zone provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;
use crate::types::{Credentials, ProviderConfig};
use crate::utils::log_sanitizer::mask_email;

pub(crate) use types::{CloudflareResponse, CloudflareZone};

pub(crate) const PROVIDER_NAME: &str = "cloudflare";
/// Cloudflare Zones API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 50;

/// Cloudflare zone provider
///
/// Credentials and transport settings are fixed for the lifetime of the instance.
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) credentials: Credentials,
    pub(crate) config: ProviderConfig,
}

impl CloudflareProvider {
    pub fn new(credentials: Credentials, config: ProviderConfig) -> Result<Self> {
        let client = create_http_client(PROVIDER_NAME, &config)?;
        match &credentials {
            Credentials::Token { .. } => {
                log::info!("[{PROVIDER_NAME}] Using API token authentication");
            }
            Credentials::LegacyKeyPair { email, .. } => {
                log::info!(
                    "[{PROVIDER_NAME}] Using legacy API key authentication for {}",
                    mask_email(email)
                );
            }
        }
        Ok(Self {
            client,
            credentials,
            config,
        })
    }
}

//! Cloudflare `ZoneProvider` trait 实现

use async_trait::async_trait;
use reqwest::Method;

use crate::error::Result;
use crate::providers::common::{normalize_domain_name, select_exact_zone};
use crate::traits::ZoneProvider;
use crate::types::{Zone, ZoneDeletion};

use super::error::format_error_message;
use super::{CloudflareProvider, CloudflareResponse, CloudflareZone, MAX_PAGE_SIZE_ZONES, PROVIDER_NAME};

impl CloudflareProvider {
    /// 将 Cloudflare zone 转换为 `Zone`
    pub(crate) fn to_zone(zone: CloudflareZone) -> Zone {
        Zone {
            id: zone.id,
            name: zone.name,
        }
    }
}

#[async_trait]
impl ZoneProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn find_zone(&self, domain: &str) -> Result<Option<Zone>> {
        let name = normalize_domain_name(domain);
        let query = [
            ("name", name.clone()),
            ("match", "all".to_string()),
            ("per_page", MAX_PAGE_SIZE_ZONES.to_string()),
        ];

        let response: CloudflareResponse<Vec<CloudflareZone>> =
            self.request(Method::GET, "/zones", &query, None).await?;
        let candidates: Vec<Zone> = response
            .result
            .unwrap_or_default()
            .into_iter()
            .map(Self::to_zone)
            .collect();
        log::debug!(
            "[{PROVIDER_NAME}] Zone listing for '{name}' returned {} candidate(s)",
            candidates.len()
        );

        Ok(select_exact_zone(candidates, domain))
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<ZoneDeletion> {
        let path = format!("/zones/{}", urlencoding::encode(zone_id));
        let response = self.send(Method::DELETE, &path, &[], None).await?;
        let body: CloudflareResponse<serde_json::Value> =
            self.parse_body(&response, Method::DELETE.as_str(), &path)?;

        if body.success {
            return Ok(ZoneDeletion::deleted());
        }

        // HTTP 2xx 但响应体声明失败
        let message = format_error_message(&body.errors, &response.body);
        log::warn!("[{PROVIDER_NAME}] Zone {zone_id} deletion refused: {message}");
        Ok(ZoneDeletion::rejected(message))
    }
}

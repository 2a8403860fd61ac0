//! Provider 公共工具函数

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::{ProviderConfig, Zone};

// ============ HTTP Client ============

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(provider: &str, config: &ProviderConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| ProviderError::Configuration {
            provider: provider.to_string(),
            detail: format!("failed to create HTTP client: {e}"),
        })
}

// ============ 域名名称处理 ============

/// 去掉首尾空白并转为小写，其余字符（包括末尾的点）保持原样
/// 如: " Example.COM " -> "example.com"
pub fn normalize_domain_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// 从候选列表中挑出与输入域名完全一致（忽略大小写）的 zone
///
/// Provider 端的名称过滤只作参考，这里独立核对，子域名或部分匹配一律不算。
pub fn select_exact_zone(zones: Vec<Zone>, domain: &str) -> Option<Zone> {
    let wanted = normalize_domain_name(domain);
    if wanted.is_empty() {
        return None;
    }
    zones
        .into_iter()
        .find(|z| normalize_domain_name(&z.name) == wanted)
}

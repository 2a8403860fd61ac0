use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{Zone, ZoneDeletion};

/// Request identity attached to errors (内部使用)
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestContext<'a> {
    /// HTTP method, upper case
    pub method: &'a str,
    /// API path relative to the base URL
    pub path: &'a str,
}

/// Provider 错误构造 Trait（内部使用）
/// 各 Provider 实现此 trait 以统一错误上下文
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 非 2xx 响应 -> `ApiError`
    fn api_error(&self, status: u16, ctx: RequestContext<'_>, message: String) -> ProviderError {
        ProviderError::ApiError {
            provider: self.provider_name().to_string(),
            status,
            method: ctx.method.to_string(),
            path: ctx.path.to_string(),
            message,
        }
    }

    /// 响应体结构不符 -> `ApiError`（保留原始状态码）
    fn parse_error(
        &self,
        status: u16,
        ctx: RequestContext<'_>,
        detail: impl std::fmt::Display,
    ) -> ProviderError {
        self.api_error(status, ctx, format!("invalid response body: {detail}"))
    }
}

/// Zone provider seam used by the batch orchestrator.
///
/// Expected outcomes ("no such zone", "deletion refused") are return values;
/// only unexpected conditions are errors.
#[async_trait]
pub trait ZoneProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Resolve a domain name to the zone with exactly that name.
    ///
    /// Returns `Ok(None)` when no zone matches exactly.
    async fn find_zone(&self, domain: &str) -> Result<Option<Zone>>;

    /// Delete a zone by identifier.
    ///
    /// A refusal reported inside a 2xx body is returned as `ZoneDeletion { success: false, .. }`.
    async fn delete_zone(&self, zone_id: &str) -> Result<ZoneDeletion>;
}

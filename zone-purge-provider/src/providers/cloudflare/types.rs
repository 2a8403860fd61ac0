//! Cloudflare API 类型定义

use serde::Deserialize;

/// Cloudflare API 通用响应
///
/// 所有字段都可能缺失：缺少 `success` 视为失败，缺少 `result` 视为空。
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<CloudflareError>,
}

/// Cloudflare 错误条目
///
/// `code` 通常是整数，但也接受字符串等任意 JSON 值。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CloudflareError {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub message: String,
}

/// Cloudflare Zone 结构
#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

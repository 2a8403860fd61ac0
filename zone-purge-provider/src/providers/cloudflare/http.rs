//! Cloudflare HTTP 请求方法

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::{HttpResponse, HttpUtils};
use crate::traits::{ProviderErrorMapper, RequestContext};
use crate::types::Credentials;

use super::error::error_message_from_body;
use super::{CloudflareProvider, PROVIDER_NAME};

const HEADER_AUTH_EMAIL: &str = "X-Auth-Email";
const HEADER_AUTH_KEY: &str = "X-Auth-Key";

impl CloudflareProvider {
    /// 按凭证类型附加认证头
    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::Token { api_token } => {
                builder.header(AUTHORIZATION, format!("Bearer {api_token}"))
            }
            Credentials::LegacyKeyPair { email, api_key } => builder
                .header(HEADER_AUTH_EMAIL, email)
                .header(HEADER_AUTH_KEY, api_key),
        }
    }

    /// 执行请求，返回 2xx 响应
    ///
    /// HTTP 429 在 `HttpUtils` 内部按退避策略重试；其他非 2xx 状态立即转为 `ApiError`。
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<HttpResponse> {
        let url = format!("{}{path}", self.config.base_url);
        let mut builder = self
            .with_auth(self.client.request(method.clone(), &url))
            .header(CONTENT_TYPE, "application/json");
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = HttpUtils::execute_with_rate_limit_retry(
            builder,
            PROVIDER_NAME,
            method.as_str(),
            path,
            self.config.rate_limit,
        )
        .await?;

        if !response.is_success() {
            let message = error_message_from_body(&response.body);
            let err = self.api_error(
                response.status,
                RequestContext {
                    method: method.as_str(),
                    path,
                },
                message,
            );
            if err.is_expected() {
                log::warn!("API 错误: {err}");
            } else {
                log::error!("API 错误: {err}");
            }
            return Err(err);
        }

        Ok(response)
    }

    /// 执行请求并把 2xx 响应体解析为 `T`
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        let response = self.send(method.clone(), path, query, body).await?;
        self.parse_body(&response, method.as_str(), path)
    }

    pub(crate) fn parse_body<T: DeserializeOwned>(
        &self,
        response: &HttpResponse,
        method: &str,
        path: &str,
    ) -> Result<T> {
        HttpUtils::parse_json(&response.body, PROVIDER_NAME)
            .map_err(|e| self.parse_error(response.status, RequestContext { method, path }, e))
    }
}

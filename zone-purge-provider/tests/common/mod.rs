//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use wiremock::MockServer;
use zone_purge_provider::{
    CloudflareProvider, Credentials, ProviderConfig, RateLimitPolicy, ZoneProvider,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Err`，并解包返回错误（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_err {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_err(), "expected Err(..), got {res:?}");
        let Err(err) = res else {
            return;
        };
        err
    }};
}

pub const TEST_TOKEN: &str = "test-token";

/// 测试用的快速退避策略（10ms 起步）
pub fn fast_rate_limit() -> RateLimitPolicy {
    RateLimitPolicy {
        max_retries: 5,
        initial_backoff: Duration::from_millis(10),
        max_backoff: Duration::from_millis(40),
    }
}

/// Cloudflare 风格的成功响应体
pub fn zones_body(zones: &[(&str, &str)]) -> serde_json::Value {
    let result: Vec<_> = zones
        .iter()
        .map(|(id, name)| serde_json::json!({ "id": id, "name": name, "status": "active" }))
        .collect();
    serde_json::json!({ "success": true, "errors": [], "messages": [], "result": result })
}

/// Cloudflare 风格的错误响应体
pub fn error_body(code: i64, message: &str) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "errors": [{ "code": code, "message": message }],
        "messages": [],
        "result": null
    })
}

/// 测试上下文 - 封装 mock 服务器和指向它的 Provider
pub struct TestContext {
    pub server: MockServer,
    pub provider: Arc<dyn ZoneProvider>,
}

impl TestContext {
    /// Token 认证
    pub async fn with_token() -> Self {
        Self::with_credentials(Credentials::Token {
            api_token: TEST_TOKEN.to_string(),
        })
        .await
    }

    pub async fn with_credentials(credentials: Credentials) -> Self {
        let server = MockServer::start().await;
        let config = ProviderConfig {
            rate_limit: fast_rate_limit(),
            ..ProviderConfig::default()
        }
        .with_base_url(server.uri());
        Self::build(server, credentials, config)
    }

    pub async fn with_config(config: impl FnOnce(ProviderConfig) -> ProviderConfig) -> Self {
        let server = MockServer::start().await;
        let config = config(
            ProviderConfig {
                rate_limit: fast_rate_limit(),
                ..ProviderConfig::default()
            }
            .with_base_url(server.uri()),
        );
        Self::build(
            server,
            Credentials::Token {
                api_token: TEST_TOKEN.to_string(),
            },
            config,
        )
    }

    fn build(server: MockServer, credentials: Credentials, config: ProviderConfig) -> Self {
        let provider = match CloudflareProvider::new(credentials, config) {
            Ok(p) => Arc::new(p) as Arc<dyn ZoneProvider>,
            Err(e) => panic!("创建测试 Provider 失败: {e}"),
        };
        Self { server, provider }
    }

    /// mock 服务器收到的请求数
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map_or(0, |r| r.len())
    }
}

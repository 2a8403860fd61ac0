//! Generic HTTP client tools
//!
//! Reusable request execution shared by provider implementations.
//! Providers construct their own `RequestBuilder` (URL, auth headers, body) and hand it here.
//!
//! # design principles
//! - **Only HTTP 429 is retried** - every other status goes straight back to the provider
//! - **Backoff state lives per request** - a fresh [`RateLimitBackoff`] for every top-level call
//! - **Parsing stays with the provider** - this module returns status and raw text

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP status returned by rate-limited APIs.
pub const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Raw HTTP response as seen by providers.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Server wait hint taken from the `Retry-After` header
    pub retry_after: Option<Duration>,
    /// Response body text
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retry limits applied to rate-limited (HTTP 429) responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Maximum number of retries; the request is abandoned once this many have been spent
    pub max_retries: u32,
    /// First wait when the server sends no `Retry-After`
    pub initial_backoff: Duration,
    /// Upper bound for the doubling backoff
    pub max_backoff: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

/// Backoff state for a single logical request.
///
/// `Attempting -> RateLimited -> (WaitThenRetry | GiveUp)`: every 429 calls
/// [`next_wait`](Self::next_wait), which either yields the wait before the next
/// attempt or `None` once the retry budget is spent.
#[derive(Debug, Clone)]
pub struct RateLimitBackoff {
    policy: RateLimitPolicy,
    retries: u32,
    backoff: Duration,
}

impl RateLimitBackoff {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            retries: 0,
            backoff: policy.initial_backoff,
        }
    }

    /// Number of retries performed so far
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Record a 429 and return how long to wait before retrying.
    ///
    /// The server hint wins over the internal backoff, but the internal backoff
    /// still doubles so that later attempts without a hint keep growing.
    pub fn next_wait(&mut self, retry_after: Option<Duration>) -> Option<Duration> {
        if self.retries >= self.policy.max_retries {
            return None;
        }
        let wait = retry_after.unwrap_or(self.backoff);
        self.retries += 1;
        self.backoff = self
            .backoff
            .saturating_mul(2)
            .min(self.policy.max_backoff);
        Some(wait)
    }
}

/// Parse a `Retry-After` value given in (possibly fractional) seconds.
///
/// HTTP-date values and negative numbers are ignored.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let secs: f64 = value.trim().parse().ok()?;
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(secs).ok()
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the raw response
    ///
    /// Unified processing: sending requests, logging, transport error classification
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (including URL, headers, body, etc.)
    /// * `provider_name` - Provider name (for logging)
    /// * `method_name` - request method name (such as "GET", "DELETE", used for logs)
    /// * `path` - API path (for logging)
    ///
    /// # Returns
    /// * `Ok(HttpResponse)` - any HTTP status, including 429 and 5xx
    /// * `Err(ProviderError::Timeout)` - the request timed out
    /// * `Err(ProviderError::NetworkError)` - any other transport failure
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        path: &str,
    ) -> Result<HttpResponse, ProviderError> {
        log::debug!("[{provider_name}] {method_name} {path}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| transport_error(provider_name, &e, None))?;

        let status = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status}");

        // Extract Retry-After header (before consuming response body)
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(provider_name, &e, Some("Failed to read response body")))?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&body)
        );

        Ok(HttpResponse {
            status,
            retry_after,
            body,
        })
    }

    /// Performs an HTTP request, retrying while the server answers HTTP 429
    ///
    /// # Retry strategy
    /// - Only HTTP 429 is retried; transport errors and every other status return immediately
    /// - Wait is the `Retry-After` hint when present, otherwise exponential backoff
    ///   (`initial_backoff`, doubling, capped at `max_backoff`)
    /// - Gives up with `ProviderError::RateLimitExceeded` after `max_retries` retries
    pub async fn execute_with_rate_limit_retry(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        path: &str,
        policy: RateLimitPolicy,
    ) -> Result<HttpResponse, ProviderError> {
        Self::retry_rate_limited(
            request_builder,
            provider_name,
            method_name,
            path,
            policy,
            tokio::time::sleep,
        )
        .await
    }

    /// 429 重试循环，等待由 `sleep` 执行
    async fn retry_rate_limited<S, F>(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        path: &str,
        policy: RateLimitPolicy,
        mut sleep: S,
    ) -> Result<HttpResponse, ProviderError>
    where
        S: FnMut(Duration) -> F,
        F: Future<Output = ()>,
    {
        let mut backoff = RateLimitBackoff::new(policy);

        loop {
            // Clone the request (RequestBuilder can only be used once)
            let Some(req) = request_builder.try_clone() else {
                // Unable to clone (usually caused by body stream), fallback to not retrying
                log::warn!("[{provider_name}] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, provider_name, method_name, path)
                    .await;
            };

            let response = Self::execute_request(req, provider_name, method_name, path).await?;
            if response.status != STATUS_TOO_MANY_REQUESTS {
                return Ok(response);
            }

            let Some(wait) = backoff.next_wait(response.retry_after) else {
                log::error!(
                    "[{provider_name}] Rate limited on {method_name} {path}, giving up after {} retries",
                    backoff.retries()
                );
                return Err(ProviderError::RateLimitExceeded {
                    provider: provider_name.to_string(),
                    method: method_name.to_string(),
                    path: path.to_string(),
                    retries: backoff.retries(),
                });
            };

            log::warn!(
                "[{}] Rate limited on {} {} (retry {}/{}), waiting {:.1}s",
                provider_name,
                method_name,
                path,
                backoff.retries(),
                policy.max_retries,
                wait.as_secs_f32()
            );
            sleep(wait).await;
        }
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(serde_json::Error)` - parsing failed; the caller decides how to report it
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, serde_json::Error>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).inspect_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
        })
    }
}

fn transport_error(provider_name: &str, e: &reqwest::Error, context: Option<&str>) -> ProviderError {
    let detail = match context {
        Some(context) => format!("{context}: {e}"),
        None => e.to_string(),
    };
    if e.is_timeout() {
        ProviderError::Timeout {
            provider: provider_name.to_string(),
            detail,
        }
    } else {
        ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail,
        }
    }
}

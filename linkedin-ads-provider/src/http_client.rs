//! Retrying HTTP transport
//!
//! [`RetryingHttpClient`] is the reqwest-backed [`HttpClient`]. Every call runs
//! a bounded sequence of attempts:
//!
//! - network failures (connect, timeout, body read) are retried with
//!   exponential backoff and surface as [`ApiError::RetriesExhausted`] once the
//!   budget is spent
//! - retryable statuses (408, 429, 5xx) are retried the same way, but the last
//!   response is returned as-is, so status classification stays with the caller
//! - everything else (serialization failures, malformed headers) fails immediately

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, Url};
use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::traits::HttpClient;
use crate::types::{RequestHeaders, Response};
use crate::utils::log_sanitizer::{mask_token, truncate_for_log};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default number of retries after the first attempt.
const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default base backoff delay.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
/// Default upper bound of a single backoff delay.
const DEFAULT_MAX_RETRY_DELAY: Duration = Duration::from_secs(30);
/// Default `User-Agent`.
const DEFAULT_USER_AGENT: &str = "linkedin-mcp-client/1.0";
/// Upper bound of the connect phase, never longer than the request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Timeout of a single attempt (connect + headers + body).
    pub timeout: Duration,
    /// Retries after the first attempt (`0` disables retrying).
    pub max_retries: u32,
    /// Base backoff delay, doubled on every retry.
    pub retry_delay: Duration,
    /// Upper bound of a single backoff delay.
    pub max_retry_delay: Duration,
    /// `User-Agent` sent with every request unless the caller overrides it.
    pub user_agent: String,
    /// Headers sent with every request; caller headers win on conflict.
    pub default_headers: HashMap<String, String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            max_retry_delay: DEFAULT_MAX_RETRY_DELAY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: HashMap::new(),
        }
    }
}

impl HttpClientConfig {
    /// Backoff before the retry that follows attempt `attempt` (0-based).
    ///
    /// `min(retry_delay * 2^attempt, max_retry_delay)`
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        1_u32
            .checked_shl(attempt)
            .and_then(|factor| self.retry_delay.checked_mul(factor))
            .map_or(self.max_retry_delay, |delay| delay.min(self.max_retry_delay))
    }
}

/// Whether a status is worth another attempt.
pub fn is_retryable_status(status: u16) -> bool {
    status == 408 || status == 429 || status >= 500
}

/// reqwest-backed [`HttpClient`] with bounded exponential-backoff retry.
///
/// # Construction
///
/// ```rust,no_run
/// use std::time::Duration;
/// use linkedin_ads_provider::RetryingHttpClient;
///
/// let client = RetryingHttpClient::builder()
///     .max_retries(2)
///     .retry_delay(Duration::from_millis(200))
///     .build()?;
/// # Ok::<(), linkedin_ads_provider::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RetryingHttpClient {
    client: Client,
    config: HttpClientConfig,
}

/// Builder for [`RetryingHttpClient`].
#[derive(Debug, Clone, Default)]
pub struct RetryingHttpClientBuilder {
    config: HttpClientConfig,
}

impl RetryingHttpClientBuilder {
    /// Timeout of a single attempt (default: 30s).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Retries after the first attempt (default: 3).
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Base backoff delay (default: 1s).
    #[must_use]
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Cap of a single backoff delay (default: 30s).
    #[must_use]
    pub fn max_retry_delay(mut self, delay: Duration) -> Self {
        self.config.max_retry_delay = delay;
        self
    }

    /// `User-Agent` header (default: `linkedin-mcp-client/1.0`).
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config
            .default_headers
            .insert(name.into(), value.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<RetryingHttpClient> {
        RetryingHttpClient::with_config(self.config)
    }
}

impl RetryingHttpClient {
    /// Creates a client with default settings (30s timeout, 3 retries, 1s..30s backoff).
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Returns a builder for customizing the transport.
    pub fn builder() -> RetryingHttpClientBuilder {
        RetryingHttpClientBuilder::default()
    }

    /// Creates a client from an explicit configuration.
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::InvalidRequest {
                detail: format!("failed to build http client: {e}"),
            })?;

        Ok(Self { client, config })
    }

    /// Active configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Merge default headers, `User-Agent`, `Content-Type` and caller headers, in that order.
    fn build_headers(&self, headers: &RequestHeaders, has_body: bool) -> Result<HeaderMap> {
        let mut merged = HeaderMap::new();

        for (name, value) in &self.config.default_headers {
            merged.insert(parse_header_name(name)?, parse_header_value(name, value)?);
        }

        merged.insert(
            USER_AGENT,
            parse_header_value(USER_AGENT.as_str(), &self.config.user_agent)?,
        );

        if has_body {
            merged.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        for (name, value) in headers {
            merged.insert(parse_header_name(name)?, parse_header_value(name, value)?);
        }

        Ok(merged)
    }

    /// One attempt: send, then read the whole body.
    async fn send_once(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&[u8]>,
        headers: &HeaderMap,
    ) -> Result<Response> {
        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .headers(headers.clone());
        if let Some(body) = body {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().await.map_err(classify_send_error)?;

        let status = response.status().as_u16();
        log::debug!("[linkedin] Response Status: {status}");

        let mut response_headers: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in response.headers() {
            response_headers
                .entry(name.as_str().to_string())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    detail: format!("failed to read response body: {e}"),
                }
            } else {
                ApiError::NetworkError {
                    detail: format!("failed to read response body: {e}"),
                }
            }
        })?;

        log::debug!(
            "[linkedin] Response Body: {}",
            truncate_for_log(&String::from_utf8_lossy(&body))
        );

        Ok(Response {
            status,
            headers: response_headers,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl HttpClient for RetryingHttpClient {
    async fn request<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        headers: &RequestHeaders,
    ) -> Result<Response>
    where
        B: Serialize + Sync + ?Sized,
    {
        // Serialized once; a failure here never consumes an attempt.
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| ApiError::SerializationError {
                detail: e.to_string(),
            })?;

        let parsed_url = Url::parse(url).map_err(|e| ApiError::InvalidRequest {
            detail: format!("invalid url {url}: {e}"),
        })?;
        let header_map = self.build_headers(headers, payload.is_some())?;

        log::debug!(
            "[linkedin] {method} {url} (authorization: {})",
            header_map
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map_or_else(|| "none".to_string(), mask_token)
        );

        let max_retries = self.config.max_retries;
        let mut attempt: u32 = 0;

        loop {
            let outcome = self
                .send_once(&method, &parsed_url, payload.as_deref(), &header_map)
                .await;

            match outcome {
                Ok(response) if is_retryable_status(response.status) && attempt < max_retries => {
                    let delay = self.config.backoff_delay(attempt);
                    log::warn!(
                        "[linkedin] Received status {} (attempt {}/{}), retrying in {:.3}s",
                        response.status,
                        attempt + 1,
                        max_retries + 1,
                        delay.as_secs_f32()
                    );
                    tokio::time::sleep(delay).await;
                }
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < max_retries => {
                    let delay = self.config.backoff_delay(attempt);
                    log::warn!(
                        "[linkedin] Request failed (attempt {}/{}), retrying in {:.3}s: {}",
                        attempt + 1,
                        max_retries + 1,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) if e.is_retryable() => {
                    return Err(ApiError::RetriesExhausted {
                        attempts: attempt + 1,
                        last: Box::new(e),
                    });
                }
                Err(e) => return Err(e),
            }

            attempt += 1;
        }
    }
}

fn classify_send_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout {
            detail: e.to_string(),
        }
    } else if e.is_builder() {
        ApiError::InvalidRequest {
            detail: e.to_string(),
        }
    } else {
        ApiError::NetworkError {
            detail: e.to_string(),
        }
    }
}

fn parse_header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiError::InvalidRequest {
        detail: format!("invalid header name {name:?}: {e}"),
    })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| ApiError::InvalidRequest {
        detail: format!("invalid value for header {name:?}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(retry_ms: u64, max_ms: u64) -> HttpClientConfig {
        HttpClientConfig {
            retry_delay: Duration::from_millis(retry_ms),
            max_retry_delay: Duration::from_millis(max_ms),
            ..HttpClientConfig::default()
        }
    }

    // ---- backoff_delay ----

    #[test]
    fn backoff_defaults() {
        let config = HttpClientConfig::default();
        assert_eq!(config.backoff_delay(0), Duration::from_secs(1));
        assert_eq!(config.backoff_delay(1), Duration::from_secs(2));
        assert_eq!(config.backoff_delay(2), Duration::from_secs(4));
        assert_eq!(config.backoff_delay(4), Duration::from_secs(16));
    }

    #[test]
    fn backoff_capped_at_max() {
        let config = HttpClientConfig::default();
        // 1s * 2^5 = 32s, capped to 30s
        assert_eq!(config.backoff_delay(5), Duration::from_secs(30));
    }

    #[test]
    fn backoff_small_delays() {
        let config = config(10, 50);
        assert_eq!(config.backoff_delay(0), Duration::from_millis(10));
        assert_eq!(config.backoff_delay(1), Duration::from_millis(20));
        assert_eq!(config.backoff_delay(2), Duration::from_millis(40));
        assert_eq!(config.backoff_delay(3), Duration::from_millis(50));
    }

    #[test]
    fn backoff_huge_attempt_does_not_overflow() {
        let config = config(1000, 60_000);
        assert_eq!(config.backoff_delay(u32::MAX), Duration::from_secs(60));
    }

    #[test]
    fn backoff_keeps_doubling_past_twenty_attempts() {
        let config = HttpClientConfig {
            retry_delay: Duration::from_micros(1),
            max_retry_delay: Duration::from_secs(3600),
            ..HttpClientConfig::default()
        };
        assert_eq!(config.backoff_delay(25), Duration::from_micros(1 << 25));
        assert_eq!(config.backoff_delay(31), Duration::from_micros(1 << 31));
        assert_eq!(config.backoff_delay(32), Duration::from_secs(3600));
    }

    // ---- is_retryable_status ----

    #[test]
    fn retryable_statuses() {
        for status in [408, 429, 500, 502, 503, 504, 599] {
            assert!(is_retryable_status(status), "{status} should be retryable");
        }
    }

    #[test]
    fn non_retryable_statuses() {
        for status in [200, 201, 204, 301, 400, 401, 403, 404, 409, 422] {
            assert!(!is_retryable_status(status), "{status} should not be retryable");
        }
    }

    // ---- build_headers ----

    #[test]
    fn caller_headers_override_defaults() {
        let client = RetryingHttpClient::builder()
            .default_header("LinkedIn-Version", "202401")
            .default_header("X-Trace", "default")
            .build();
        assert!(client.is_ok(), "unexpected build result: {client:?}");
        let Ok(client) = client else {
            return;
        };

        let caller: RequestHeaders = [("linkedin-version".to_string(), "202505".to_string())].into();
        let merged = client.build_headers(&caller, false);
        assert!(merged.is_ok(), "unexpected header result: {merged:?}");
        let Ok(merged) = merged else {
            return;
        };

        assert_eq!(merged.get_all("linkedin-version").iter().count(), 1);
        assert_eq!(merged.get("linkedin-version").map(HeaderValue::as_bytes), Some(&b"202505"[..]));
        assert_eq!(merged.get("x-trace").map(HeaderValue::as_bytes), Some(&b"default"[..]));
        assert_eq!(
            merged.get(USER_AGENT).map(HeaderValue::as_bytes),
            Some(DEFAULT_USER_AGENT.as_bytes())
        );
        assert!(merged.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn body_sets_content_type() {
        let client = RetryingHttpClient::new();
        assert!(client.is_ok(), "unexpected build result: {client:?}");
        let Ok(client) = client else {
            return;
        };

        let merged = client.build_headers(&RequestHeaders::new(), true);
        assert!(matches!(
            merged.as_ref().ok().and_then(|m| m.get(CONTENT_TYPE)),
            Some(v) if v.as_bytes() == b"application/json"
        ));
    }

    #[test]
    fn invalid_header_name_rejected() {
        let client = RetryingHttpClient::new();
        let Ok(client) = client else {
            return;
        };
        let caller: RequestHeaders = [("bad header".to_string(), "x".to_string())].into();
        let merged = client.build_headers(&caller, false);
        assert!(
            matches!(&merged, Err(ApiError::InvalidRequest { .. })),
            "unexpected header result: {merged:?}"
        );
    }
}

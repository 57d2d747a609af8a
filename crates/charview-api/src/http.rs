//! HTTP transport for the catalog API.
//!
//! [`HttpBackend`] is the seam the client is generic over: production code
//! uses [`ReqwestBackend`], tests use `testing::FakeBackend`.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::models::ApiConfig;

/// GET a URL and hand back the decoded JSON body.
///
/// A 404 surfaces as [`ApiError::NotFound`]; callers decide what it means.
/// Not part of the public API; consumers go through `CatalogClientPort`.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn get_json(&self, url: &Url) -> ApiResult<Value>;
}

/// When and how long to wait before trying a request again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u8,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }

    /// Delay before retry number `retry` (1-based): base, 2x base, 4x base...
    pub fn backoff(&self, retry: u8) -> Duration {
        let factor = 1u32 << u32::from(retry.saturating_sub(1)).min(16);
        self.base_delay.saturating_mul(factor)
    }

    /// Whether `err` after `retries_done` retries is worth another attempt.
    ///
    /// Server errors and dropped connections are; timeouts, 4xx and bad
    /// payloads are not.
    pub fn should_retry(&self, err: &ApiError, retries_done: u8) -> bool {
        if retries_done >= self.max_retries {
            return false;
        }
        match err {
            ApiError::ApiRequestFailed { status, .. } => *status >= 500,
            ApiError::Network(e) => !e.is_timeout(),
            _ => false,
        }
    }
}

/// reqwest-backed transport with retries.
pub struct ReqwestBackend {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl ReqwestBackend {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            retry: RetryPolicy::from_config(config),
        })
    }

    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    async fn get_once(&self, url: &Url) -> ApiResult<Value> {
        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::ApiRequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // A malformed body is a parse error, not a transport error
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json(&self, url: &Url) -> ApiResult<Value> {
        let mut retries = 0;
        loop {
            match self.get_once(url).await {
                Ok(json) => return Ok(json),
                Err(err) if self.retry.should_retry(&err, retries) => {
                    retries += 1;
                    let delay = self.retry.backoff(retries);
                    debug!(target: "charview.api", %url, %err, retries, ?delay, "Retrying request");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

//! HTTP fetcher with bounded retry
//!
//! This module handles every request sent to the provider, including:
//! - Building the HTTP client with user agent and timeouts
//! - Classifying failures as terminal or transient
//! - Exponential backoff between transient failures
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | HTTP 4xx | Immediate → `TourError::Client` |
//! | HTTP 5xx | Retry up to `max_retries`, delay `2^attempt * base_delay` |
//! | Network error | Retry up to `max_retries`, delay `2^attempt * base_delay` |
//! | Anything else | Returned to the caller uninterpreted |

use crate::config::{ClientConfig, RetryConfig};
use crate::{TourError, TransientCause};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Source of backoff delays
///
/// Production code sleeps on the tokio timer; tests substitute an
/// implementation that records the requested delays and returns at once.
#[async_trait]
pub trait Sleeper: Send + Sync + fmt::Debug {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by `tokio::time::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Builds an HTTP client with the configured user agent and timeouts
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Delay before retry number `attempt` (0-based)
pub fn backoff_delay(retry: &RetryConfig, attempt: u32) -> Duration {
    let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    Duration::from_millis(retry.base_delay_ms.saturating_mul(factor))
}

/// Issues GET requests with retry and backoff
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    retry: RetryConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl Fetcher {
    /// Creates a fetcher that sleeps on the tokio timer
    pub fn new(client: Client, retry: RetryConfig) -> Self {
        Self::with_sleeper(client, retry, Arc::new(TokioSleeper))
    }

    /// Creates a fetcher with a custom delay source
    pub fn with_sleeper(client: Client, retry: RetryConfig, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            client,
            retry,
            sleeper,
        }
    }

    /// Fetches a URL, retrying transient failures
    ///
    /// # Returns
    ///
    /// * `Ok(Response)` - Any response that is neither 4xx nor 5xx
    /// * `Err(TourError::Client)` - Upstream 4xx, after exactly one attempt
    /// * `Err(TourError::Transient)` - 5xx or network failure on every attempt
    pub async fn fetch(&self, url: &Url) -> Result<Response, TourError> {
        let max_retries = self.retry.max_retries;
        let mut attempt: u32 = 0;

        loop {
            let cause = match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_client_error() {
                        return Err(TourError::Client {
                            status: status.as_u16(),
                            url: redact(url),
                        });
                    }

                    if !status.is_server_error() {
                        return Ok(response);
                    }

                    TransientCause::ServerStatus(status.as_u16())
                }
                Err(e) => TransientCause::Network(e),
            };

            if attempt >= max_retries {
                if cfg!(debug_assertions) {
                    tracing::warn!(
                        "Giving up on {} after {} retries: {}",
                        redact(url),
                        max_retries,
                        cause
                    );
                }
                return Err(TourError::Transient {
                    retries: max_retries,
                    cause,
                });
            }

            let delay = backoff_delay(&self.retry, attempt);
            if cfg!(debug_assertions) {
                tracing::debug!(
                    "Attempt {}/{} for {} failed ({}), retrying in {}ms",
                    attempt + 1,
                    max_retries + 1,
                    redact(url),
                    cause,
                    delay.as_millis()
                );
            }

            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }
}

/// URL for logs and errors, with the credential masked
pub(crate) fn redact(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k.eq_ignore_ascii_case("serviceKey") {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();

    if pairs.is_empty() {
        return masked.to_string();
    }

    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

//! Core HTTP GET with rate limiting
//!
//! Requests are paced by a `governor` rate limiter and sent exactly once.
//! Status codes are passed through untouched; deciding what counts as a
//! failure is left to the caller.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{clock::DefaultClock, state::InMemoryState, Jitter, Quota, RateLimiter};
use reqwest::Client;
use url::Url;

use super::TransportResponse;
use crate::errors::{ConfigError, ConfigResult, FetchError, FetchResult};

/// HTTP operations handler
#[derive(Debug)]
pub struct HttpHandler {
    client: Client,
    rate_limiter: RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>,
}

impl HttpHandler {
    /// Creates a new HttpHandler with the given client and rate limit
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `rate_limit_rps` is zero
    pub fn new(client: Client, rate_limit_rps: u32) -> ConfigResult<Self> {
        let rate_limiter = Self::build_rate_limiter(rate_limit_rps)?;
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    fn build_rate_limiter(
        rate_limit_rps: u32,
    ) -> ConfigResult<RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>> {
        let rps = NonZeroU32::new(rate_limit_rps).ok_or_else(|| ConfigError::InvalidValue {
            field: "rate_limit_rps".to_string(),
            value: rate_limit_rps.to_string(),
            reason: "Rate limit must be non-zero".to_string(),
        })?;
        Ok(RateLimiter::direct(Quota::per_second(rps)))
    }

    /// Issues a single GET and reads the body as text
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the request cannot be sent or the
    /// body cannot be read. Non-success statuses are not errors here.
    pub async fn get(&self, url: &Url) -> FetchResult<TransportResponse> {
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(50)))
            .await;

        let transport_error = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source: Box::new(e),
        };

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport_error)?;

        tracing::debug!("GET {} -> HTTP {} ({} bytes)", url, status, text.len());

        Ok(TransportResponse {
            status,
            body: if text.is_empty() { None } else { Some(text) },
        })
    }
}

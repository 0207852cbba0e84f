//! HTTP transport for repository access
//!
//! The resolver only needs a GET that returns a status and an optional text
//! body. That capability is the [`Transport`] trait; [`HttpTransport`] is the
//! `reqwest`-backed implementation used outside of tests.
//!
//! - `config`: HTTP client configuration and building
//! - `http`: rate-limited GET

use async_trait::async_trait;
use url::Url;

use crate::errors::{ConfigResult, FetchResult};

pub mod config;
pub mod http;

pub use config::ClientConfig;

use http::HttpHandler;

/// Raw outcome of a GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, `None` when the server sent no bytes
    pub body: Option<String>,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// GET capability consumed by the resolver
///
/// Implementations report only connection-level failures as errors. Any
/// HTTP status, including 4xx and 5xx, is a successful transport result.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> FetchResult<TransportResponse>;
}

/// `reqwest` transport with rate limiting and no retries
#[derive(Debug)]
pub struct HttpTransport {
    http_handler: HttpHandler,
}

impl HttpTransport {
    /// Creates a transport with the default [`ClientConfig`]
    pub fn new() -> ConfigResult<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Creates a transport with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the HTTP client cannot be built or the rate
    /// limit is zero
    pub fn with_config(config: &ClientConfig) -> ConfigResult<Self> {
        let client = config.build_http_client()?;
        let http_handler = HttpHandler::new(client, config.rate_limit_rps)?;
        Ok(Self { http_handler })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> FetchResult<TransportResponse> {
        self.http_handler.get(url).await
    }
}

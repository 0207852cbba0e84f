//! Error types for the mod index client
//!
//! Errors are split by concern: [`FetchError`] for everything the resolver
//! and transport can report, [`ConfigError`] for configuration loading, and
//! [`AppError`] as the top-level type used by the CLI.
//!
//! A mod that is simply not listed in the index is never an error. The
//! resolver reports it as `Ok(None)` so callers can tell "nothing there"
//! apart from "could not determine".

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while fetching or parsing remote index resources
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network-level failure (connection refused, DNS, timeout)
    #[error("HTTP request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Server answered with a non-success status
    #[error("Server returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Server answered with a success status but no usable payload
    #[error("Server returned an empty body for {url}")]
    EmptyBody { url: String },

    /// Payload was present but is not a valid document
    #[error("Failed to parse JSON document from {url}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Identifier does not follow the `loader:name[:version]` grammar
    #[error("Invalid identifier: {identifier}. Expected \"loader:name\" or \"loader:name:version\"")]
    InvalidIdentifier { identifier: String },

    /// A resource URL could not be built from the repository root
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },
}

impl FetchError {
    /// URL of the request that failed, if the error is tied to one
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::HttpStatus { url, .. }
            | FetchError::EmptyBody { url }
            | FetchError::Parse { url, .. }
            | FetchError::InvalidUrl { url, .. } => Some(url),
            FetchError::InvalidIdentifier { .. } => None,
        }
    }

    /// Whether calling the operation again might succeed
    ///
    /// Nothing is retried internally; this is only a hint for callers.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport { .. } => true,
            FetchError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            FetchError::EmptyBody { .. }
            | FetchError::Parse { .. }
            | FetchError::InvalidIdentifier { .. }
            | FetchError::InvalidUrl { .. } => false,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// HTTP client could not be built from the configuration
    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Fetch or parse error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Output serialization error
    #[error("Failed to render output")]
    Render(#[from] serde_json::Error),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Fetch(FetchError::Transport { .. }) => "transport",
            AppError::Fetch(FetchError::HttpStatus { .. }) => "http_status",
            AppError::Fetch(FetchError::EmptyBody { .. }) => "empty_body",
            AppError::Fetch(FetchError::Parse { .. }) => "parse",
            AppError::Fetch(_) => "request",
            AppError::Config(_) => "config",
            AppError::Render(_) => "render",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

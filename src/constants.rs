//! Application constants for the mod index client
//!
//! Constants are grouped by functional domain.

use std::time::Duration;

/// Environment variable names
pub mod env {
    /// Overrides the repository root URL
    pub const REPOSITORY: &str = "MOD_INDEX_REPOSITORY";
}

/// Remote repository layout
pub mod repository {
    /// Default repository root, stored without a trailing slash
    pub const DEFAULT_URL: &str = "https://raw.githubusercontent.com/ReviversMC/the-mod-index-api";

    /// Directory holding the index and every manifest
    pub const MODS_DIR: &str = "mods";

    /// Index file name inside [`MODS_DIR`]
    pub const INDEX_FILE: &str = "index.json";

    /// Extension appended to `<loader>/<name>` for manifest files
    pub const MANIFEST_EXTENSION: &str = "json";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("mod-index/", env!("CARGO_PKG_VERSION"));

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum idle connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 4;
}

/// Rate limiting configuration
pub mod limits {
    /// Default rate limit for repository requests (requests per second)
    pub const DEFAULT_RATE_LIMIT_RPS: u32 = 10;
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file name
    pub const LOCAL_FILE: &str = "mod-index.toml";

    /// Directory under the user config dir
    pub const APP_DIR: &str = "mod-index";

    /// File name inside [`APP_DIR`]
    pub const FILE_NAME: &str = "config.toml";
}

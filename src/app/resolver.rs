//! Index resolution and caching
//!
//! [`IndexResolver`] owns at most one cached copy of `mods/index.json`.
//! Manifest lookups consult that cache first and only fetch the per-mod
//! manifest when the index lists a matching entry, so an unknown mod costs
//! no more than the (cached) index.
//!
//! Manifests live at `<root>/mods/<loader>/<name>.json`. This is the only
//! path convention used.
//!
//! The cache is replaced only by a fully successful, fully parsed fetch.
//! Any failure leaves the previous index in place.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use crate::app::client::{ClientConfig, HttpTransport, Transport};
use crate::app::identifier::{self, Identifier};
use crate::app::models::{IndexDocument, IndexEntry, ManifestDocument, ManifestFileEntry};
use crate::constants::repository;
use crate::errors::{FetchError, FetchResult, Result};

/// Resolves mod identifiers against a remote repository
///
/// The cached index has no expiry. Call [`force_refresh_index`] when the
/// remote repository may have changed.
///
/// [`force_refresh_index`]: IndexResolver::force_refresh_index
#[derive(Debug)]
pub struct IndexResolver<T = HttpTransport> {
    transport: T,
    repository_root: String,
    cached_index: RwLock<Option<Arc<IndexDocument>>>,
}

impl IndexResolver<HttpTransport> {
    /// Creates a resolver backed by a `reqwest` transport
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the HTTP client cannot be built and
    /// `AppError::Fetch` if the repository URL is invalid
    pub fn with_http(repository_url: &str, config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(config)?;
        Ok(Self::new(transport, repository_url)?)
    }
}

impl<T: Transport> IndexResolver<T> {
    /// Creates a resolver over `transport` for the repository at `repository_url`
    ///
    /// Trailing slashes are stripped from the URL so every resource path is
    /// joined with exactly one separator.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if the URL cannot serve as a base for
    /// resource paths
    pub fn new(transport: T, repository_url: &str) -> FetchResult<Self> {
        let repository_root = repository_url.trim_end_matches('/').to_string();

        let resolver = Self {
            transport,
            repository_root,
            cached_index: RwLock::new(None),
        };
        // Reject roots that cannot be joined with resource paths
        resolver.index_url()?;

        debug!("Created index resolver for {}", resolver.repository_root);
        Ok(resolver)
    }

    /// Repository root, without trailing slash
    pub fn repository_url(&self) -> &str {
        &self.repository_root
    }

    /// URL of the index document
    pub fn index_url(&self) -> FetchResult<Url> {
        self.resource_url(&[repository::MODS_DIR, repository::INDEX_FILE])
    }

    /// URL of the manifest for a mod, `<root>/mods/<loader>/<name>.json`
    pub fn manifest_url(&self, id: &Identifier) -> FetchResult<Url> {
        let file_name = format!("{}.{}", id.name(), repository::MANIFEST_EXTENSION);
        self.resource_url(&[repository::MODS_DIR, id.loader(), &file_name])
    }

    fn resource_url(&self, segments: &[&str]) -> FetchResult<Url> {
        let invalid = |error: String| FetchError::InvalidUrl {
            url: self.repository_root.clone(),
            error,
        };

        let mut url = Url::parse(&self.repository_root).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Returns the cached index without performing any I/O
    pub async fn cached_index(&self) -> Option<Arc<IndexDocument>> {
        self.cached_index.read().await.clone()
    }

    /// Downloads the index unconditionally and replaces the cache
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure, non-success status,
    /// empty body or malformed JSON. The existing cache is left untouched.
    pub async fn force_refresh_index(&self) -> FetchResult<Arc<IndexDocument>> {
        let url = self.index_url()?;
        let index: IndexDocument = self.fetch_document(&url).await?;
        let index = Arc::new(index);

        *self.cached_index.write().await = Some(Arc::clone(&index));
        info!(
            "Cached index from {} ({} entries, schema {})",
            url,
            index.files.len(),
            index.schema_version.as_deref().unwrap_or("unknown")
        );

        Ok(index)
    }

    /// Returns the cached index, downloading it first if nothing is cached
    ///
    /// # Errors
    ///
    /// Same as [`force_refresh_index`](IndexResolver::force_refresh_index)
    pub async fn get_or_fetch_index(&self) -> FetchResult<Arc<IndexDocument>> {
        if let Some(index) = self.cached_index().await {
            debug!("Using cached index");
            return Ok(index);
        }
        self.force_refresh_index().await
    }

    /// Downloads the manifest for a generic identifier (`loader:name`)
    ///
    /// A version segment on the identifier, if any, is ignored. Returns
    /// `Ok(None)` when the index has no entry for the mod.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidIdentifier` for identifiers without a
    /// loader and name, and any error from fetching the index or manifest.
    pub async fn fetch_manifest(&self, generic_identifier: &str) -> FetchResult<Option<ManifestDocument>> {
        let id = Identifier::parse(generic_identifier)?.to_generic();
        let generic = id.generic();
        let index = self.get_or_fetch_index().await?;

        let Some(entry) = index.find_first(&generic) else {
            debug!("No index entry matches {}", generic);
            return Ok(None);
        };
        debug!(
            "Index entry {} matches {}",
            entry.identifier.as_deref().unwrap_or_default(),
            generic
        );

        let url = self.manifest_url(&id)?;
        let manifest: ManifestDocument = self.fetch_document(&url).await?;
        Ok(Some(manifest))
    }

    /// Finds the manifest file entry for a full identifier (`loader:name:version`)
    ///
    /// The file entry matches when `<loader>:<name>:<fileName>` equals the
    /// identifier. Returns `Ok(None)` if the mod or the file is unknown.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_manifest`](IndexResolver::fetch_manifest)
    pub async fn fetch_manifest_file_entry(&self, identifier: &str) -> FetchResult<Option<ManifestFileEntry>> {
        let generic = identifier::generic_prefix(identifier);
        let Some(manifest) = self.fetch_manifest(generic).await? else {
            return Ok(None);
        };

        let file = manifest.find_file(identifier).cloned();
        if file.is_none() {
            debug!("Manifest for {} has no file entry {}", generic, identifier);
        }
        Ok(file)
    }

    /// Index entries whose SHA-1 equals `sha1_hex`, in index order
    ///
    /// Hashes are compared case-insensitively. More than one entry can
    /// share a hash; all of them are returned.
    ///
    /// # Errors
    ///
    /// Any error from fetching the index
    pub async fn find_index_entries_by_hash(&self, sha1_hex: &str) -> FetchResult<Vec<IndexEntry>> {
        let index = self.get_or_fetch_index().await?;
        Ok(index.entries_with_hash(sha1_hex).cloned().collect())
    }

    async fn fetch_document<D: DeserializeOwned>(&self, url: &Url) -> FetchResult<D> {
        let response = self.transport.get(url).await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            e
        })?;

        if !response.is_success() {
            warn!("{} returned HTTP {}", url, response.status);
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        let body = match response.body {
            Some(body) if !body.trim().is_empty() => body,
            _ => {
                warn!("{} returned an empty body", url);
                return Err(FetchError::EmptyBody {
                    url: url.to_string(),
                });
            }
        };

        serde_json::from_str(&body).map_err(|source| {
            warn!("Malformed JSON from {}: {}", url, source);
            FetchError::Parse {
                url: url.to_string(),
                source,
            }
        })
    }
}

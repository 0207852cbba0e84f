//! Core application logic for the mod index client
//!
//! This module contains the identifier grammar, the document models, the
//! HTTP transport and the index resolver that ties them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mod_index::app::{ClientConfig, IndexResolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = IndexResolver::with_http(
//!     "https://raw.githubusercontent.com/ReviversMC/the-mod-index-api/main/fakeIndex",
//!     &ClientConfig::default(),
//! )?;
//!
//! match resolver.fetch_manifest("bricks:fakeMod").await? {
//!     Some(manifest) => {
//!         for file in &manifest.files {
//!             println!("{:?} for {:?}", file.file_name, file.mc_versions);
//!         }
//!     }
//!     None => println!("bricks:fakeMod is not in the index"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod hash;
pub mod identifier;
pub mod models;
pub mod resolver;

// Re-export main public API
pub use client::{ClientConfig, HttpTransport, Transport, TransportResponse};
pub use identifier::{generic_prefix, matches_generic, Identifier};
pub use models::{
    IndexDocument, IndexEntry, ManifestDocument, ManifestFileEntry, ManifestLinks, OtherLink,
};
pub use resolver::IndexResolver;

//! Mod Index Client Library
//!
//! A Rust library for reading repositories laid out like the-mod-index: a
//! `mods/index.json` listing every file identifier, plus one manifest per mod
//! with authorship, links and download records.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use app::{IndexDocument, IndexResolver, ManifestDocument};
pub use errors::{AppError, FetchError, Result};

//! Command-line interface components
//!
//! This module contains CLI-specific code: argument parsing and the
//! command handlers that drive the resolver.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, FileArgs, GlobalArgs, HashArgs, IndexArgs, ManifestArgs};
pub use commands::{
    build_resolver, handle_file, handle_hash, handle_index, handle_manifest, load_config,
};

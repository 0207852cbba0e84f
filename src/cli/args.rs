//! Command-line argument parsing for the mod index client
//!
//! This module defines the CLI structure using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Mod Index - query a the-mod-index style repository
#[derive(Parser, Debug)]
#[command(
    name = "mod_index",
    version,
    about = "Look up mods, manifests and files in a mod index repository",
    long_about = "Reads mods/index.json from a mod index repository and resolves generic identifiers
(loader:name) to manifests and full identifiers (loader:name:version) to file entries."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - only errors are logged
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Repository root URL (overrides config and environment)
    #[arg(short, long, global = true, value_name = "URL")]
    pub repository: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the entries of the repository index
    Index(IndexArgs),

    /// Show the manifest of a mod
    Manifest(ManifestArgs),

    /// Show a single file entry
    File(FileArgs),

    /// Find index entries by SHA-1 content hash
    Hash(HashArgs),
}

/// Arguments for the index command
#[derive(Args, Debug, Clone)]
pub struct IndexArgs {
    /// Only list entries of this generic identifier (loader:name)
    #[arg(short, long, value_name = "LOADER:NAME")]
    pub filter: Option<String>,

    /// Print the raw index document as JSON
    #[arg(long, conflicts_with = "generic")]
    pub json: bool,

    /// List each mod once by its generic identifier (loader:name)
    #[arg(short, long)]
    pub generic: bool,
}

/// Arguments for the manifest command
#[derive(Args, Debug, Clone)]
pub struct ManifestArgs {
    /// Generic identifier, e.g. "fabric:sodium"
    #[arg(value_name = "LOADER:NAME")]
    pub identifier: String,
}

/// Arguments for the file command
#[derive(Args, Debug, Clone)]
pub struct FileArgs {
    /// Full identifier, e.g. "fabric:sodium:mc1.19-0.4.2"
    #[arg(value_name = "LOADER:NAME:VERSION")]
    pub identifier: String,
}

/// Arguments for the hash command
#[derive(Args, Debug, Clone)]
pub struct HashArgs {
    /// Hex-encoded SHA-1 digest
    #[arg(value_name = "SHA1")]
    pub sha1: String,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level implied by the verbosity flags, if any was given
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

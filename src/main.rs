//! Mod Index CLI application
//!
//! Command-line interface for querying a mod index repository.

use std::io;
use std::process;

use tracing::{debug, info};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, EnvFilter};

use mod_index::cli::{
    build_resolver, handle_file, handle_hash, handle_index, handle_manifest, load_config, Cli,
    Commands,
};
use mod_index::config::AppConfig;
use mod_index::errors::{AppError, Result};

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let config = load_config(&cli.global).await?;

    init_logging(&cli, &config)?;
    info!("Mod Index v{} starting", env!("CARGO_PKG_VERSION"));

    let resolver = build_resolver(&config)?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Index(args) => {
            debug!("Executing index command");
            handle_index(&resolver, args, &mut stdout).await
        }
        Commands::Manifest(args) => {
            debug!("Executing manifest command");
            handle_manifest(&resolver, args, &mut stdout).await
        }
        Commands::File(args) => {
            debug!("Executing file command");
            handle_file(&resolver, args, &mut stdout).await
        }
        Commands::Hash(args) => {
            debug!("Executing hash command");
            handle_hash(&resolver, args, &mut stdout).await
        }
    }
}

/// Initialize logging from CLI verbosity, falling back to the configured level
fn init_logging(cli: &Cli, config: &AppConfig) -> Result<()> {
    let level = match cli.log_level() {
        Some(level) => level,
        None => config.logging.log_level()?,
    };

    let directive = format!("mod_index={}", level.to_string().to_lowercase())
        .parse::<Directive>()
        .map_err(|e| AppError::generic(format!("Invalid log directive: {}", e)))?;
    let filter = EnvFilter::from_default_env().add_directive(directive);

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .with_writer(io::stderr)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    }
    Ok(())
}

//! Command handlers for the mod index CLI
//!
//! Handlers write human readable output to any `Write` sink so they can be
//! exercised without a terminal.

use std::io::Write;

use tracing::{debug, info};

use crate::app::{
    matches_generic, IndexEntry, IndexResolver, ManifestDocument, ManifestFileEntry, Transport,
};
use crate::cli::{FileArgs, GlobalArgs, HashArgs, IndexArgs, ManifestArgs};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};

/// Load configuration and apply global CLI overrides
pub async fn load_config(global: &GlobalArgs) -> Result<AppConfig> {
    let mut config = AppConfig::load(global.config.clone()).await?;
    if let Some(url) = &global.repository {
        config.apply_repository_override(url);
    }
    Ok(config)
}

/// Build an HTTP-backed resolver from configuration
pub fn build_resolver(config: &AppConfig) -> Result<IndexResolver> {
    let resolver = IndexResolver::with_http(&config.repository.url, &config.client_config())?;
    info!("Using repository {}", resolver.repository_url());
    Ok(resolver)
}

/// Handle the index command
pub async fn handle_index<T: Transport>(
    resolver: &IndexResolver<T>,
    args: IndexArgs,
    out: &mut impl Write,
) -> Result<()> {
    let index = resolver.get_or_fetch_index().await?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, index.as_ref())?;
        writeln!(out)?;
        return Ok(());
    }

    if args.generic {
        let filter = args.filter.as_deref();
        let mut listed = 0;
        for generic in index
            .generic_identifiers()
            .into_iter()
            .filter(|generic| filter.map_or(true, |f| matches_generic(generic, f)))
        {
            writeln!(out, "{}", generic)?;
            listed += 1;
        }
        if listed == 0 {
            writeln!(out, "No matching entries")?;
        }
        return Ok(());
    }

    let mut listed = 0;
    let entries: Box<dyn Iterator<Item = &IndexEntry> + '_> = match args.filter.as_deref() {
        Some(filter) => Box::new(index.entries_matching(filter)),
        None => Box::new(index.files.iter()),
    };
    for entry in entries {
        writeln!(
            out,
            "{}  {}",
            entry.sha1_hash.as_deref().unwrap_or("-"),
            entry.identifier.as_deref().unwrap_or("<no identifier>")
        )?;
        listed += 1;
    }

    debug!("Listed {} of {} index entries", listed, index.files.len());
    if listed == 0 {
        writeln!(out, "No matching entries")?;
    }
    Ok(())
}

/// Handle the manifest command
pub async fn handle_manifest<T: Transport>(
    resolver: &IndexResolver<T>,
    args: ManifestArgs,
    out: &mut impl Write,
) -> Result<()> {
    match resolver.fetch_manifest(&args.identifier).await? {
        Some(manifest) => write_manifest(&manifest, out),
        None => Err(AppError::generic(format!(
            "{} is not listed in the repository index",
            args.identifier
        ))),
    }
}

/// Handle the file command
pub async fn handle_file<T: Transport>(
    resolver: &IndexResolver<T>,
    args: FileArgs,
    out: &mut impl Write,
) -> Result<()> {
    match resolver.fetch_manifest_file_entry(&args.identifier).await? {
        Some(file) => write_file_entry(&file, out),
        None => Err(AppError::generic(format!(
            "No file entry found for {}",
            args.identifier
        ))),
    }
}

/// Handle the hash command
pub async fn handle_hash<T: Transport>(
    resolver: &IndexResolver<T>,
    args: HashArgs,
    out: &mut impl Write,
) -> Result<()> {
    let entries = resolver.find_index_entries_by_hash(args.sha1.trim()).await?;
    if entries.is_empty() {
        return Err(AppError::generic(format!(
            "No index entry has hash {}",
            args.sha1
        )));
    }

    for entry in entries {
        writeln!(
            out,
            "{}",
            entry.identifier.as_deref().unwrap_or("<no identifier>")
        )?;
    }
    Ok(())
}

fn write_manifest(manifest: &ManifestDocument, out: &mut impl Write) -> Result<()> {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    writeln!(out, "Name:       {}", field(&manifest.fancy_name))?;
    writeln!(out, "Author:     {}", field(&manifest.author))?;
    writeln!(out, "License:    {}", field(&manifest.license))?;
    writeln!(out, "CurseForge: {}", field(&manifest.curse_forge_id))?;
    writeln!(out, "Modrinth:   {}", field(&manifest.modrinth_id))?;

    if let Some(links) = &manifest.links {
        writeln!(out, "Issues:     {}", field(&links.issue))?;
        writeln!(out, "Source:     {}", field(&links.source_control))?;
        for link in &links.others {
            writeln!(out, "{}: {}", field(&link.link_name), field(&link.url))?;
        }
    }

    writeln!(out, "Files ({}):", manifest.files.len())?;
    for file in &manifest.files {
        writeln!(
            out,
            "  {} [{}]",
            field(&file.file_name),
            file.mc_versions.join(", ")
        )?;
    }
    Ok(())
}

fn write_file_entry(file: &ManifestFileEntry, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, file)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use url::Url;

    use crate::app::TransportResponse;
    use crate::errors::FetchResult;

    const ROOT: &str = "https://repo.example.com";

    /// Serves a two-mod index and the `bricks:fakeMod` manifest
    struct FixtureTransport;

    #[async_trait]
    impl Transport for FixtureTransport {
        async fn get(&self, url: &Url) -> FetchResult<TransportResponse> {
            let body = match url.path() {
                "/mods/index.json" => Some(
                    r#"{"schemaVersion":"1.0.0","files":[
                        {"identifier":"bricks:fakeMod:brick-1.18.2+1.2.0","sha1Hash":"47a013e660d408619d894b20806b1d5086aab03b"},
                        {"identifier":"bricks:otherMod:1.0.0"}
                    ]}"#,
                ),
                "/mods/bricks/fakeMod.json" => Some(
                    r#"{"fancyName":"Fake Mod","author":"Fake Author","license":"AGPL-3.0",
                        "files":[{"fileName":"brick-1.18.2+1.2.0","mcVersions":["1.18.2"],"downloadUrls":[]}]}"#,
                ),
                _ => None,
            };
            Ok(match body {
                Some(body) => TransportResponse {
                    status: 200,
                    body: Some(body.to_string()),
                },
                None => TransportResponse {
                    status: 404,
                    body: None,
                },
            })
        }
    }

    fn resolver() -> IndexResolver<FixtureTransport> {
        IndexResolver::new(FixtureTransport, ROOT).unwrap()
    }

    fn output(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).unwrap()
    }

    #[tokio::test]
    async fn test_index_listing() {
        let mut out = Vec::new();
        let args = IndexArgs {
            filter: None,
            json: false,
            generic: false,
        };
        handle_index(&resolver(), args, &mut out).await.unwrap();

        let text = output(out);
        assert!(text.contains("47a013e660d408619d894b20806b1d5086aab03b  bricks:fakeMod:brick-1.18.2+1.2.0"));
        assert!(text.contains("-  bricks:otherMod:1.0.0"));
    }

    #[tokio::test]
    async fn test_index_filter() {
        let mut out = Vec::new();
        let args = IndexArgs {
            filter: Some("bricks:other".to_string()),
            json: false,
            generic: false,
        };
        handle_index(&resolver(), args, &mut out).await.unwrap();
        assert_eq!(output(out), "No matching entries\n");
    }

    #[tokio::test]
    async fn test_index_json() {
        let mut out = Vec::new();
        let args = IndexArgs {
            filter: None,
            json: true,
            generic: false,
        };
        handle_index(&resolver(), args, &mut out).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["files"].as_array().unwrap().len(), 2);
        assert!(value["files"][1].get("sha1Hash").is_none());
    }

    #[tokio::test]
    async fn test_index_generic_listing() {
        let mut out = Vec::new();
        let args = IndexArgs {
            filter: None,
            json: false,
            generic: true,
        };
        handle_index(&resolver(), args, &mut out).await.unwrap();
        assert_eq!(output(out), "bricks:fakeMod\nbricks:otherMod\n");

        let mut out = Vec::new();
        let args = IndexArgs {
            filter: Some("bricks:otherMod".to_string()),
            json: false,
            generic: true,
        };
        handle_index(&resolver(), args, &mut out).await.unwrap();
        assert_eq!(output(out), "bricks:otherMod\n");
    }

    #[tokio::test]
    async fn test_manifest_output() {
        let mut out = Vec::new();
        let args = ManifestArgs {
            identifier: "bricks:fakeMod".to_string(),
        };
        handle_manifest(&resolver(), args, &mut out).await.unwrap();

        let text = output(out);
        assert!(text.contains("Name:       Fake Mod"));
        assert!(text.contains("Modrinth:   -"));
        assert!(text.contains("  brick-1.18.2+1.2.0 [1.18.2]"));
    }

    #[tokio::test]
    async fn test_unknown_manifest_is_reported() {
        let mut out = Vec::new();
        let args = ManifestArgs {
            identifier: "bricks:missing".to_string(),
        };
        let err = handle_manifest(&resolver(), args, &mut out).await.unwrap_err();
        assert_eq!(err.category(), "generic");
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_file_output() {
        let mut out = Vec::new();
        let args = FileArgs {
            identifier: "bricks:fakeMod:brick-1.18.2+1.2.0".to_string(),
        };
        handle_file(&resolver(), args, &mut out).await.unwrap();

        let file: ManifestFileEntry = serde_json::from_slice(&out).unwrap();
        assert_eq!(file.mc_versions, vec!["1.18.2"]);
    }

    #[tokio::test]
    async fn test_manifest_fetch_failure_surfaces() {
        // Listed in the index, but the manifest is missing upstream
        let mut out = Vec::new();
        let args = FileArgs {
            identifier: "bricks:otherMod:1.0.0".to_string(),
        };
        let err = handle_file(&resolver(), args, &mut out).await.unwrap_err();
        assert_eq!(err.category(), "http_status");
    }

    #[tokio::test]
    async fn test_hash_lookup() {
        let mut out = Vec::new();
        let args = HashArgs {
            sha1: "47a013e660d408619d894b20806b1d5086aab03b".to_string(),
        };
        handle_hash(&resolver(), args, &mut out).await.unwrap();
        assert_eq!(output(out), "bricks:fakeMod:brick-1.18.2+1.2.0\n");
    }
}

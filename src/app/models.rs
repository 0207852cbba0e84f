//! Data models for the mod index
//!
//! Two documents make up a repository: the index (`mods/index.json`), which
//! lists every known file identifier with its content hash, and one manifest
//! per mod (`mods/<loader>/<name>.json`) carrying authorship, links and file
//! records.
//!
//! Every scalar field is optional. A missing key and an explicit JSON `null`
//! both decode to `None`, and `None` is always encoded by omitting the key,
//! so absence round-trips as absence. Missing arrays decode as empty.

use serde::{Deserialize, Serialize};

use crate::app::hash;
use crate::app::identifier::{self, Identifier};

/// The `mods/index.json` document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    /// Schema version of the index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// File entries, in repository order
    #[serde(default)]
    pub files: Vec<IndexEntry>,
}

impl IndexDocument {
    /// First entry matching a generic identifier, in index order
    pub fn find_first(&self, generic: &str) -> Option<&IndexEntry> {
        self.files.iter().find(|entry| entry.matches_generic(generic))
    }

    /// All entries matching a generic identifier, in index order
    pub fn entries_matching<'a>(
        &'a self,
        generic: &'a str,
    ) -> impl Iterator<Item = &'a IndexEntry> + 'a {
        self.files
            .iter()
            .filter(move |entry| entry.matches_generic(generic))
    }

    /// Entries whose content hash equals `sha1_hex` (case-insensitive)
    pub fn entries_with_hash<'a>(
        &'a self,
        sha1_hex: &'a str,
    ) -> impl Iterator<Item = &'a IndexEntry> + 'a {
        self.files.iter().filter(move |entry| {
            entry
                .sha1_hash
                .as_deref()
                .is_some_and(|hash| hash.eq_ignore_ascii_case(sha1_hex))
        })
    }

    /// Distinct generic identifiers, in order of first appearance
    pub fn generic_identifiers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.files {
            if let Some(id) = entry.identifier.as_deref() {
                let generic = identifier::generic_prefix(id);
                if !seen.contains(&generic) {
                    seen.push(generic);
                }
            }
        }
        seen
    }
}

/// One file entry of the index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    /// Full identifier, `loader:name:version`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Hex-encoded SHA-1 of the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1_hash: Option<String>,
}

impl IndexEntry {
    /// Segment-aware prefix match; an absent identifier counts as `""`
    pub fn matches_generic(&self, generic: &str) -> bool {
        identifier::matches_generic(self.identifier.as_deref().unwrap_or(""), generic)
    }

    /// The identifier parsed into its segments
    pub fn parsed_identifier(&self) -> Option<Identifier> {
        self.identifier
            .as_deref()
            .and_then(|id| Identifier::parse(id).ok())
    }
}

/// A per-mod manifest document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDocument {
    /// Schema version of the manifest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Human readable project name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fancy_name: Option<String>,
    /// Author or publisher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// SPDX license id, or a URL for custom licenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// CurseForge project id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curse_forge_id: Option<String>,
    /// Modrinth project id (not the slug)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modrinth_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ManifestLinks>,
    /// File versions of the mod
    #[serde(default)]
    pub files: Vec<ManifestFileEntry>,
}

impl ManifestDocument {
    /// First file entry whose derivable identifier equals `identifier`
    ///
    /// The derivable identifier of a file is `<generic>:<fileName>`, where
    /// the generic part is taken from `identifier` itself.
    pub fn find_file(&self, identifier: &str) -> Option<&ManifestFileEntry> {
        let generic = identifier::generic_prefix(identifier);
        self.files
            .iter()
            .find(|file| file.identifier_for(generic).as_deref() == Some(identifier))
    }
}

/// Project links of a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestLinks {
    /// Issue tracker URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    /// Source repository URL, no mirrors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_control: Option<String>,
    /// Any other links, like "Discord" or "Wiki"
    #[serde(default)]
    pub others: Vec<OtherLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One downloadable file of a mod
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestFileEntry {
    /// File name; not authoritative for version checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Compatible Minecraft versions
    #[serde(default)]
    pub mc_versions: Vec<String>,
    /// Hex-encoded SHA-1 of the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1_hash: Option<String>,
    /// Mirrors the file can be downloaded from
    #[serde(default)]
    pub download_urls: Vec<String>,
}

impl ManifestFileEntry {
    /// Full identifier of this file under the given generic identifier
    pub fn identifier_for(&self, generic: &str) -> Option<String> {
        self.file_name
            .as_deref()
            .map(|file_name| format!("{}:{}", generic, file_name))
    }

    /// Check downloaded bytes against the recorded SHA-1
    ///
    /// Returns `false` when no hash is recorded.
    pub fn verify_sha1(&self, content: &[u8]) -> bool {
        self.sha1_hash
            .as_deref()
            .is_some_and(|expected| hash::verify_sha1(content, expected))
    }
}

//! Identifier grammar and matching
//!
//! A full identifier names one file: `loader:name:version`. A generic
//! identifier names a mod regardless of version: `loader:name`. Only the
//! first two colons are separators, so the version segment is free text and
//! may contain colons of its own.

use std::fmt;
use std::str::FromStr;

use crate::errors::FetchError;

/// Returns the generic part of an identifier
///
/// Strips exactly the trailing `:version` segment. Identifiers with fewer
/// than two colons carry no version and are returned unchanged.
pub fn generic_prefix(identifier: &str) -> &str {
    match identifier.match_indices(':').nth(1) {
        Some((index, _)) => &identifier[..index],
        None => identifier,
    }
}

/// Segment-aware match of an identifier against a generic identifier
///
/// `a:b:1.0` and `a:b` match `a:b`, but `a:bc:1.0` does not.
pub fn matches_generic(identifier: &str, generic: &str) -> bool {
    match identifier.strip_prefix(generic) {
        Some(rest) => rest.is_empty() || rest.starts_with(':'),
        None => false,
    }
}

/// Loader and name become URL path segments
fn is_path_segment(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..")
}

/// A parsed `loader:name[:version]` identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    loader: String,
    name: String,
    version: Option<String>,
}

impl Identifier {
    /// Parse a generic or full identifier
    ///
    /// Loader and name must be non-empty path segments other than `.` and
    /// `..`. A version segment, when present, is kept verbatim.
    pub fn parse(identifier: &str) -> Result<Self, FetchError> {
        let invalid = || FetchError::InvalidIdentifier {
            identifier: identifier.to_string(),
        };

        let mut segments = identifier.splitn(3, ':');
        let loader = segments.next().filter(|s| is_path_segment(s)).ok_or_else(invalid)?;
        let name = segments.next().filter(|s| is_path_segment(s)).ok_or_else(invalid)?;
        let version = segments.next().map(str::to_string);

        Ok(Self {
            loader: loader.to_string(),
            name: name.to_string(),
            version,
        })
    }

    /// Mod loader segment, e.g. `fabric`
    pub fn loader(&self) -> &str {
        &self.loader
    }

    /// Mod name segment
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version segment, absent for generic identifiers
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Whether this identifier carries a version segment
    pub fn is_generic(&self) -> bool {
        self.version.is_none()
    }

    /// The `loader:name` form of this identifier
    pub fn generic(&self) -> String {
        format!("{}:{}", self.loader, self.name)
    }

    /// Drops the version segment
    pub fn to_generic(&self) -> Identifier {
        Identifier {
            loader: self.loader.clone(),
            name: self.name.clone(),
            version: None,
        }
    }

}

impl FromStr for Identifier {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::parse(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{}", self.loader, self.name, version),
            None => write!(f, "{}:{}", self.loader, self.name),
        }
    }
}

// src/error.rs
//! Error taxonomy.
//!
//! Catalog-level failures (`FetchError`, `ParseError`, `UnsupportedFamilyError`) are fatal for the
//! build call that hit them. `InvalidInputError` is per observation: the checker yields it in
//! place of a verdict and carries on with the next item.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("no table at index {index} (document has {found})")]
    TableNotFound { index: usize, found: usize },
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported version family '{0}' (expected legacy/2016 or current/365)")]
pub struct UnsupportedFamilyError(pub String);

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    UnsupportedFamily(#[from] UnsupportedFamilyError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    #[error("empty version string")]
    Empty,

    #[error("version '{0}' must have between 2 and 4 numeric fields")]
    FieldCount(String),

    #[error("version '{input}' has a non-numeric field '{field}'")]
    Field { input: String, field: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("observation with version '{version}' has no computer name")]
    EmptyComputerName { version: String },

    #[error("{computer_name}: cannot parse version '{version}': {source}")]
    Version {
        computer_name: String,
        version: String,
        #[source]
        source: VersionParseError,
    },

    #[error("{computer_name}: version '{version}' lacks build and revision fields")]
    MissingBuildFields { computer_name: String, version: String },
}

impl InvalidInputError {
    /// Computer name of the rejected observation (empty when that was the problem).
    pub fn computer_name(&self) -> &str {
        match self {
            InvalidInputError::EmptyComputerName { .. } => "",
            InvalidInputError::Version { computer_name, .. }
            | InvalidInputError::MissingBuildFields { computer_name, .. } => computer_name,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("cannot read inventory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("inventory has no header row")]
    Empty,

    #[error("inventory header lacks a '{0}' column")]
    MissingColumn(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown export format '{0}' (expected csv or tsv)")]
    Format(String),
}

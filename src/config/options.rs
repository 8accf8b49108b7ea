// src/config/options.rs
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::consts::*;
use crate::error::SettingsError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub source: SourceOptions,
    pub store: StoreOptions,
    pub export: ExportOptions,
}

/// Where the release tables come from and how they are fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub legacy_url: String,
    pub current_url: String,
    pub timeout_secs: u64,
    /// Serve pages from the store when present.
    pub cache_pages: bool,
    /// With `cache_pages`: fetch anyway and overwrite the stored copy.
    pub refresh: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            legacy_url: s!(LEGACY_URL),
            current_url: s!(CURRENT_URL),
            timeout_secs: REQUEST_TIMEOUT_SECS,
            cache_pages: false,
            refresh: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    pub dir: PathBuf,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { dir: PathBuf::from(STORE_DIR) }
    }
}

impl StoreOptions {
    pub fn pages_dir(&self) -> PathBuf {
        self.dir.join(PAGES_SUBDIR)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

impl FromStr for ExportFormat {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            other => Err(SettingsError::Format(s!(other))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_headers: bool,
    /// `None` writes to stdout.
    pub out: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_headers: true,
            out: None,
        }
    }
}

impl ExportOptions {
    /// Final file path for an export whose default name is `stem`.
    /// A directory (existing, or spelled with a trailing separator) gets `<stem>.<ext>` appended;
    /// anything else is used as given, extension included.
    pub fn out_path(&self, stem: &str) -> Option<PathBuf> {
        let out = self.out.as_ref()?;
        if out.is_dir() || looks_like_dir_hint(out) {
            Some(out.join(join!(stem, ".", self.format.ext())))
        } else {
            Some(out.clone())
        }
    }
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

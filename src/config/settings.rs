// src/config/settings.rs
//! Optional TOML settings file, overlaid onto `AppOptions::default()`.
//!
//! ```toml
//! [source]
//! current_url = "https://…"
//! timeout_secs = 20
//! cache_pages = true
//!
//! [store]
//! dir = ".store"
//!
//! [export]
//! format = "tsv"
//! include_headers = false
//! out = "out/"
//! ```
//!
//! Every key is optional. Command-line flags are applied after the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::consts::SETTINGS_FILE;
use super::options::AppOptions;
use crate::error::SettingsError;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub source: SourceSettings,
    pub store: StoreSettings,
    pub export: ExportSettings,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SourceSettings {
    pub legacy_url: Option<String>,
    pub current_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub cache_pages: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSettings {
    pub dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    pub format: Option<String>,
    pub include_headers: Option<bool>,
    pub out: Option<PathBuf>,
}

impl Settings {
    pub fn parse(text: &str, path: &Path) -> Result<Self, SettingsError> {
        toml::from_str(text).map_err(|source| SettingsError::Toml { path: path.to_path_buf(), source })
    }

    /// Read `path`, or `office_channel.toml` in the working directory when `path` is `None`.
    /// A missing default file is not an error; a missing explicit file is.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(SETTINGS_FILE), false),
        };
        if !required && !path.exists() {
            return Ok(Settings::default());
        }
        let text = fs::read_to_string(&path)
            .map_err(|source| SettingsError::Io { path: path.clone(), source })?;
        let settings = Self::parse(&text, &path)?;
        logd!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn apply(&self, opts: &mut AppOptions) -> Result<(), SettingsError> {
        let src = &self.source;
        if let Some(u) = &src.legacy_url { opts.source.legacy_url = u.clone(); }
        if let Some(u) = &src.current_url { opts.source.current_url = u.clone(); }
        if let Some(t) = src.timeout_secs { opts.source.timeout_secs = t; }
        if let Some(c) = src.cache_pages { opts.source.cache_pages = c; }

        if let Some(d) = &self.store.dir { opts.store.dir = d.clone(); }

        let exp = &self.export;
        if let Some(f) = &exp.format { opts.export.format = f.parse()?; }
        if let Some(h) = exp.include_headers { opts.export.include_headers = h; }
        if let Some(o) = &exp.out { opts.export.out = Some(o.clone()); }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::ExportFormat;

    #[test]
    fn overlay_only_touches_present_keys() {
        let text = r#"
            [source]
            timeout_secs = 5
            cache_pages = true

            [export]
            format = "tsv"
        "#;
        let settings = Settings::parse(text, Path::new("test.toml")).unwrap();
        let mut opts = AppOptions::default();
        settings.apply(&mut opts).unwrap();

        assert_eq!(opts.source.timeout_secs, 5);
        assert!(opts.source.cache_pages);
        assert_eq!(opts.export.format, ExportFormat::Tsv);
        assert_eq!(opts.source.current_url, AppOptions::default().source.current_url);
        assert!(opts.export.include_headers);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Settings::parse("[source]\nurl = \"x\"\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Toml { .. }));
    }

    #[test]
    fn bad_format_fails_on_apply() {
        let settings = Settings::parse("[export]\nformat = \"xml\"\n", Path::new("t.toml")).unwrap();
        let mut opts = AppOptions::default();
        assert!(matches!(settings.apply(&mut opts), Err(SettingsError::Format(_))));
    }
}

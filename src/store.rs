// src/store.rs
//! Local page cache under the store directory (`.store/pages/<key>.html`).
//!
//! Only raw page bodies are stored; catalogs are always rebuilt from them, so a cached page and
//! a live one go through the same extraction and coercion.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::net::PageFetcher;
use crate::error::FetchError;

/// `PageFetcher` decorator: serve from disk when possible, otherwise fetch and remember.
pub struct CachingFetcher<F> {
    inner: F,
    dir: PathBuf,
    refresh: bool,
}

impl<F: PageFetcher> CachingFetcher<F> {
    pub fn new(inner: F, dir: impl Into<PathBuf>) -> Self {
        Self { inner, dir: dir.into(), refresh: false }
    }

    /// Always go to the network, then overwrite the stored copy.
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(join!(&cache_key(url), ".html"))
    }
}

impl<F: PageFetcher> PageFetcher for CachingFetcher<F> {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let path = self.path_for(url);
        if !self.refresh {
            match fs::read_to_string(&path) {
                Ok(body) => {
                    logd!("Cache hit {} for {url}", path.display());
                    return Ok(body);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => logw!("Cache read {} failed ({e}); fetching", path.display()),
            }
        }

        let body = self.inner.fetch(url)?;
        if let Err(e) = save_page(&path, &body) {
            logw!("Cache write {} failed: {e}", path.display());
        }
        Ok(body)
    }
}

fn save_page(path: &Path, body: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, body)
}

/// File-name-safe key for a URL: host and path with every run of other characters turned
/// into a single `_`.
pub fn cache_key(url: &str) -> String {
    let rest = url.split_once("://").map_or(url, |(_, r)| r);
    let mut out = String::with_capacity(rest.len());
    let mut last_us = false;
    for ch in rest.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' {
            out.push(ch);
            last_us = false;
        } else if !last_us {
            out.push('_');
            last_us = true;
        }
    }
    let out = out.trim_matches('_');
    if out.is_empty() { s!("page") } else { s!(out) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_flat_file_names() {
        assert_eq!(
            cache_key("https://learn.microsoft.com/en-us/officeupdates/msp-files-office-2016"),
            "learn.microsoft.com_en-us_officeupdates_msp-files-office-2016"
        );
        assert_eq!(cache_key("https://x.test/a?b=c&d"), "x.test_a_b_c_d");
        assert_eq!(cache_key("///"), "page");
    }
}

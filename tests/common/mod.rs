// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use office_channel::catalog::SourceUrls;
use office_channel::core::PageFetcher;
use office_channel::error::FetchError;

pub const LEGACY_URL: &str = "https://fixture.test/legacy";
pub const CURRENT_URL: &str = "https://fixture.test/current";

pub fn urls() -> SourceUrls {
    SourceUrls { legacy: LEGACY_URL.into(), current: CURRENT_URL.into() }
}

/// Serves canned pages by URL and counts requests.
#[derive(Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
}

impl FixtureFetcher {
    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl PageFetcher for FixtureFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status { url: url.into(), status: 404 })
    }
}

pub fn table(header: &[&str], rows: &[&[&str]]) -> String {
    let mut html = String::from("<html><body><h1>Updates</h1>\n<table>\n<thead><tr>");
    for h in header {
        html.push_str(&format!("<th>{h}</th>"));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        html.push_str("<tr>");
        for c in *row {
            html.push_str(&format!("<td>{c}</td>"));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody></table>\n<table><tr><td>other</td></tr></table></body></html>");
    html
}

pub fn current_page() -> String {
    table(
        &["Channel", "Version", "Build", "Release date"],
        &[
            &["Monthly Enterprise Channel", "2110", "14527.20312", "November 9, 2021"],
            &["Monthly Enterprise Channel", "2109", "14430.20380", "November 9, 2021"],
            &["Current Channel", "2110", "14527.20276", "November 1, 2021"],
            &["Monthly Enterprise Channel", "2111", "14701.20164", "December 14, 2021"],
            &["Semi-Annual Enterprise Channel", "2102", "13801.21050", "December 14, 2021"],
        ],
    )
}

pub fn legacy_page() -> String {
    table(
        &["Release year", "Release date", "Version number", "More information"],
        &[
            &["2016", "March 8", "16.0.4351.1000", "<a href=\"#\">KB 3114 </a>"],
            &["", "April 12", "16.0.4366.1000", "KB 3115"],
            &["2017", "January 3", "16.0.4480.1000", "KB 3141"],
            &["", "February 7", "not published", ""],
        ],
    )
}

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("office_channel_{name}"));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

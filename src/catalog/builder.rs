// src/catalog/builder.rs
use std::collections::HashMap;
use std::time::Instant;

use chrono::NaiveDate;

use super::family::{SourceUrls, VersionFamily};
use super::records::{Catalog, CurrentRelease, LegacyRelease, ReleaseVersion};
use crate::config::consts::SOURCE_TABLE_INDEX;
use crate::core::net::PageFetcher;
use crate::core::version::BuildVersion;
use crate::core::sanitize::{normalize_ws, strip_ws};
use crate::error::{CatalogError, ParseError};
use crate::specs::table::{self, GenericRecord};

// Column titles as published, with the synthesized positional title last.
const LEGACY_YEAR: &[&str] = &["Release year", "Year", "P1"];
const LEGACY_DATE: &[&str] = &["Release date", "Date", "P2"];
const LEGACY_VERSION: &[&str] = &["Version number", "Version", "P3"];
const LEGACY_LINK: &[&str] = &["More information", "Link", "KB article", "P4"];

const CURRENT_CHANNEL: &[&str] = &["Channel", "P1"];
const CURRENT_VERSION: &[&str] = &["Version", "P2"];
const CURRENT_BUILD: &[&str] = &["Build", "P3"];
const CURRENT_DATE: &[&str] = &["Release date", "P4"];
const CURRENT_SUPPORTED: &[&str] =
    &["Version supported until", "Supported until", "End of service", "P5"];

/// Accepted release-date spellings, tried in order.
const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%d %b %Y", "%d %B %Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Fetches a family's release page and turns its first table into a typed catalog.
///
/// One fetch per `build` call; nothing is cached here (wrap the fetcher for that).
pub struct CatalogBuilder<F> {
    fetcher: F,
    urls: SourceUrls,
}

impl<F: PageFetcher> CatalogBuilder<F> {
    pub fn new(fetcher: F, urls: SourceUrls) -> Self {
        Self { fetcher, urls }
    }

    pub fn build(&self, family: VersionFamily) -> Result<Catalog, CatalogError> {
        let url = self.urls.url(family);
        logd!("Building {family} catalog from {url}");
        let html = self.fetcher.fetch(url)?;

        let t = Instant::now();
        let catalog = parse_catalog(&html, family)?;
        logf!("{family} catalog: {} releases (parsed in {:?})", catalog.len(), t.elapsed());
        Ok(catalog)
    }

    /// `build`, with the family given by name (`legacy`, `2016`, `current`, `365`, `m365`).
    pub fn build_named(&self, family: &str) -> Result<Catalog, CatalogError> {
        self.build(family.parse()?)
    }

    pub fn build_current(&self) -> Result<Vec<CurrentRelease>, CatalogError> {
        let releases = self
            .build(VersionFamily::Current)?
            .into_current()
            .unwrap_or_default();
        Ok(releases)
    }
}

/// Offline half of `build`: page text in, catalog out.
pub fn parse_catalog(html: &str, family: VersionFamily) -> Result<Catalog, ParseError> {
    let records = table::extract(html, SOURCE_TABLE_INDEX)?;
    Ok(match family {
        VersionFamily::Legacy => Catalog::Legacy(coerce_legacy(records)),
        VersionFamily::Current => {
            let mut rows: Vec<CurrentRelease> = records.map(coerce_current).collect();
            tag_latest_builds(&mut rows);
            Catalog::Current(rows)
        }
    })
}

/* ---------------- legacy ---------------- */

/// Coerce legacy rows. The year column is only filled on the first row of each year, so a
/// blank (or unreadable) year takes the last resolved one; a blank first row stays `None`.
pub fn coerce_legacy<I: IntoIterator<Item = GenericRecord>>(records: I) -> Vec<LegacyRelease> {
    let mut last_year: Option<i32> = None;
    records
        .into_iter()
        .map(|rec| {
            let year_cell = cell(&rec, LEGACY_YEAR);
            let parsed = year_cell.parse::<i32>().ok();
            if parsed.is_none() && !year_cell.is_empty() {
                logd!("Legacy year '{year_cell}' unreadable; keeping {last_year:?}");
            }
            let year = parsed.or(last_year);
            last_year = year;

            let release_date = s!(cell(&rec, LEGACY_DATE));
            let version_cell = cell(&rec, LEGACY_VERSION);
            let version_number = match version_cell.parse::<BuildVersion>() {
                Ok(v) => Some(v),
                Err(e) => {
                    logd!("Legacy row '{release_date}': version '{version_cell}' dropped: {e}");
                    None
                }
            };
            let day = released_on(&release_date, year);
            if day.is_none() {
                logd!("Legacy row '{release_date}' (year {year:?}): no release day");
            }

            LegacyRelease {
                release_year: year,
                release_link: strip_ws(cell(&rec, LEGACY_LINK)),
                version_number,
                released_on: day,
                release_date,
            }
        })
        .collect()
}

/// `"March 14"` + 2016 → 2016-03-14. Anything but exactly `<month> <day>` is `None`.
pub fn released_on(release_date: &str, year: Option<i32>) -> Option<NaiveDate> {
    let year = year?;
    let mut parts = release_date.split_whitespace();
    let (month, day) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let day = day.trim_end_matches(',');
    NaiveDate::parse_from_str(&format!("{month} {day} {year}"), "%B %d %Y").ok()
}

/* ---------------- current ---------------- */

pub fn coerce_current(rec: GenericRecord) -> CurrentRelease {
    let supported = cell(&rec, CURRENT_SUPPORTED);
    CurrentRelease {
        channel: normalize_ws(cell(&rec, CURRENT_CHANNEL)),
        version: ReleaseVersion::parse(cell(&rec, CURRENT_VERSION)),
        build: s!(cell(&rec, CURRENT_BUILD)),
        release_date: parse_release_date(cell(&rec, CURRENT_DATE)),
        supported_until: (!supported.is_empty()).then(|| s!(supported)),
        is_latest_build: false,
    }
}

pub fn parse_release_date(cell: &str) -> Option<NaiveDate> {
    let cell = normalize_ws(cell);
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(&cell, f).ok())
}

/// Partition by channel and mark the highest build of each partition.
///
/// Builds compare numerically field by field; an unparsable build ranks below every parsable
/// one. On a tie the earliest row wins. A partition of one is its own latest.
pub fn tag_latest_builds(rows: &mut [CurrentRelease]) {
    let mut partitions: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, r) in rows.iter().enumerate() {
        partitions.entry(r.channel.as_str()).or_default().push(i);
    }

    let latest: Vec<usize> = partitions
        .values()
        .map(|members| {
            let mut best = members[0];
            let mut best_build = rows[best].build_version();
            for &i in &members[1..] {
                let build = rows[i].build_version();
                if build > best_build {
                    best = i;
                    best_build = build;
                }
            }
            best
        })
        .collect();

    for r in rows.iter_mut() {
        r.is_latest_build = false;
    }
    for i in latest {
        rows[i].is_latest_build = true;
    }
}

fn cell<'r>(rec: &'r GenericRecord, titles: &[&str]) -> &'r str {
    rec.first_of(titles).unwrap_or("").trim()
}

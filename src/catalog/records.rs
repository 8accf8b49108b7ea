// src/catalog/records.rs
use std::fmt;

use chrono::NaiveDate;

use crate::core::BuildVersion;
use crate::data::{opt_cell, DataSet};

/// One row of the legacy (2016) update table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyRelease {
    /// Carried forward from the nearest earlier row that had one.
    pub release_year: Option<i32>,
    /// Partial date as published, e.g. `March 14`.
    pub release_date: String,
    pub version_number: Option<BuildVersion>,
    /// Link cell with every whitespace character removed.
    pub release_link: String,
    /// `release_date` completed with `release_year`.
    pub released_on: Option<NaiveDate>,
}

/// Version column of the current table: usually `2111`, sometimes `20H2`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReleaseVersion {
    Number(u32),
    Label(String),
}

impl ReleaseVersion {
    pub fn parse(cell: &str) -> Self {
        let cell = cell.trim();
        match cell.parse::<u32>() {
            Ok(n) if cell.bytes().all(|b| b.is_ascii_digit()) => ReleaseVersion::Number(n),
            _ => ReleaseVersion::Label(s!(cell)),
        }
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseVersion::Number(n) => write!(f, "{n}"),
            ReleaseVersion::Label(s) => f.write_str(s),
        }
    }
}

/// One row of the current (channel/build) table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentRelease {
    pub channel: String,
    pub version: ReleaseVersion,
    /// Kept as published (`14701.20164`); compared through `build_version`.
    pub build: String,
    pub release_date: Option<NaiveDate>,
    pub supported_until: Option<String>,
    pub is_latest_build: bool,
}

impl CurrentRelease {
    pub fn build_version(&self) -> Option<BuildVersion> {
        self.build.parse().ok()
    }
}

/// A built catalog; the variant follows the requested family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Catalog {
    Legacy(Vec<LegacyRelease>),
    Current(Vec<CurrentRelease>),
}

impl Catalog {
    pub fn len(&self) -> usize {
        match self {
            Catalog::Legacy(v) => v.len(),
            Catalog::Current(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_current(self) -> Option<Vec<CurrentRelease>> {
        match self {
            Catalog::Current(v) => Some(v),
            Catalog::Legacy(_) => None,
        }
    }

    pub fn into_legacy(self) -> Option<Vec<LegacyRelease>> {
        match self {
            Catalog::Legacy(v) => Some(v),
            Catalog::Current(_) => None,
        }
    }
}

pub const LEGACY_HEADERS: [&str; 5] = ["ReleaseYear", "ReleaseDate", "VersionNumber", "Link", "ReleasedOn"];
pub const CURRENT_HEADERS: [&str; 6] =
    ["Channel", "Version", "Build", "ReleaseDate", "SupportedUntil", "IsLatestBuild"];

impl From<&Catalog> for DataSet {
    fn from(catalog: &Catalog) -> Self {
        match catalog {
            Catalog::Legacy(rows) => {
                let mut ds = DataSet::new(&LEGACY_HEADERS);
                for r in rows {
                    ds.push(cells![
                        opt_cell(&r.release_year),
                        r.release_date,
                        opt_cell(&r.version_number),
                        r.release_link,
                        opt_cell(&r.released_on),
                    ]);
                }
                ds
            }
            Catalog::Current(rows) => {
                let mut ds = DataSet::new(&CURRENT_HEADERS);
                for r in rows {
                    ds.push(cells![
                        r.channel,
                        r.version,
                        r.build,
                        opt_cell(&r.release_date),
                        opt_cell(&r.supported_until),
                        r.is_latest_build,
                    ]);
                }
                ds
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixed_versions_stay_labels() {
        assert_eq!(ReleaseVersion::parse("2111"), ReleaseVersion::Number(2111));
        assert_eq!(ReleaseVersion::parse(" 20H2 "), ReleaseVersion::Label(s!("20H2")));
        assert_eq!(ReleaseVersion::parse("+12"), ReleaseVersion::Label(s!("+12")));
    }

    #[test]
    fn current_catalog_exports_blank_for_missing_values() {
        let cat = Catalog::Current(vec![CurrentRelease {
            channel: s!("Beta Channel"),
            version: ReleaseVersion::Label(s!("Insider")),
            build: s!("15000.10000"),
            release_date: None,
            supported_until: None,
            is_latest_build: true,
        }]);
        let ds = DataSet::from(&cat);
        assert_eq!(ds.rows[0], ["Beta Channel", "Insider", "15000.10000", "", "", "true"]);
    }
}

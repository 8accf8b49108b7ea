// src/checker.rs
//! Per-machine verdicts: is the installed build at least the latest build of its channel?
//!
//! The current-family catalog is built once per `UpdateChecker` and reused for every
//! evaluation made through it. A failed build is returned before any verdict exists.
//! Individual observations that fail validation come out as `Err` items in the verdict
//! stream; the rest of the stream is unaffected.

use std::sync::{Mutex, OnceLock};

use crate::catalog::{CatalogBuilder, CurrentRelease};
use crate::channels;
use crate::core::net::PageFetcher;
use crate::core::version::BuildVersion;
use crate::data::{opt_cell, DataSet};
use crate::error::{CatalogError, InvalidInputError};

/// One installed-software observation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstalledSoftware {
    pub computer_name: String,
    pub computer_id: String,
    /// Four-part client version, e.g. `16.0.14701.20164`.
    pub version: String,
}

impl InstalledSoftware {
    pub fn new(computer_name: &str, computer_id: &str, version: &str) -> Self {
        Self {
            computer_name: s!(computer_name),
            computer_id: s!(computer_id),
            version: s!(version),
        }
    }
}

/// `requires_update` and `is_latest_version` are `None` when the channel has no latest build
/// in the catalog (unknown channel, placeholder GUID, or an unreadable published build).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerdictRecord {
    pub computer_name: String,
    pub channel: String,
    pub requires_update: Option<bool>,
    pub expected_build: Option<String>,
    pub observed_build: String,
    pub is_latest_version: Option<bool>,
    pub computer_id: String,
}

pub const VERDICT_HEADERS: [&str; 7] = [
    "ComputerName",
    "Channel",
    "RequiresUpdate",
    "ExpectedBuild",
    "ObservedBuild",
    "IsLatestVersion",
    "ComputerId",
];

type BuildFn<'a> = Box<dyn Fn() -> Result<Vec<CurrentRelease>, CatalogError> + Send + Sync + 'a>;

/// Shareable across threads; concurrent first calls wait on a single build.
pub struct UpdateChecker<'a> {
    source: Option<BuildFn<'a>>,
    building: Mutex<()>,
    catalog: OnceLock<Vec<CurrentRelease>>,
}

impl<'a> UpdateChecker<'a> {
    /// Checker that builds the current catalog on first use.
    pub fn new<F: PageFetcher + Send + Sync + 'a>(builder: CatalogBuilder<F>) -> Self {
        Self {
            source: Some(Box::new(move || builder.build_current())),
            building: Mutex::new(()),
            catalog: OnceLock::new(),
        }
    }

    /// Checker over an already-built catalog.
    pub fn with_catalog(releases: Vec<CurrentRelease>) -> Self {
        Self { source: None, building: Mutex::new(()), catalog: OnceLock::from(releases) }
    }

    /// The memoized current catalog, building it on first call.
    pub fn catalog(&self) -> Result<&[CurrentRelease], CatalogError> {
        if let Some(c) = self.catalog.get() {
            return Ok(c);
        }
        let _guard = self.building.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(c) = self.catalog.get() {
            return Ok(c);
        }
        let built = match &self.source {
            Some(build) => build()?,
            None => Vec::new(),
        };
        Ok(self.catalog.get_or_init(|| built))
    }

    /// Evaluate `items` against the latest build of `channel_or_guid`.
    ///
    /// Fails only when the catalog cannot be built. The returned stream yields one entry per
    /// input item, in order.
    pub fn evaluate<I>(&self, channel_or_guid: &str, items: I) -> Result<Verdicts<I::IntoIter>, CatalogError>
    where
        I: IntoIterator<Item = InstalledSoftware>,
    {
        let catalog = self.catalog()?;
        let resolved = channels::resolve(channel_or_guid);
        let expected = resolved.and_then(|name| latest_for(catalog, name));

        let expected_version = expected.and_then(CurrentRelease::build_version);
        match (expected, &expected_version) {
            (None, _) => logw!("No latest build for channel '{channel_or_guid}'; verdicts are indeterminate"),
            (Some(r), None) => logw!("Latest build '{}' of '{}' is unreadable; verdicts are indeterminate", r.build, r.channel),
            (Some(r), Some(_)) => logd!("Channel '{}' latest build {}", r.channel, r.build),
        }

        Ok(Verdicts {
            items: items.into_iter(),
            judge: Judge {
                channel: s!(resolved.unwrap_or(channel_or_guid)),
                expected_build: expected.map(|r| r.build.clone()),
                expected_version,
            },
        })
    }
}

/// The record tagged latest for `channel`, if the catalog has one.
pub fn latest_for<'c>(catalog: &'c [CurrentRelease], channel: &str) -> Option<&'c CurrentRelease> {
    catalog.iter().find(|r| r.is_latest_build && r.channel == channel)
}

/// Lazy verdict stream returned by [`UpdateChecker::evaluate`].
pub struct Verdicts<I> {
    items: I,
    judge: Judge,
}

impl<I: Iterator<Item = InstalledSoftware>> Iterator for Verdicts<I> {
    type Item = Result<VerdictRecord, InvalidInputError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.next()?;
        Some(self.judge.judge(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

struct Judge {
    channel: String,
    expected_build: Option<String>,
    expected_version: Option<BuildVersion>,
}

impl Judge {
    fn judge(&self, item: InstalledSoftware) -> Result<VerdictRecord, InvalidInputError> {
        let computer_name = item.computer_name.trim();
        if computer_name.is_empty() {
            return Err(InvalidInputError::EmptyComputerName { version: item.version });
        }

        let version: BuildVersion = item.version.parse().map_err(|source| InvalidInputError::Version {
            computer_name: s!(computer_name),
            version: item.version.clone(),
            source,
        })?;
        let observed = match (version.fields().len(), version.build_revision()) {
            (4, Some(b)) => b,
            _ => {
                return Err(InvalidInputError::MissingBuildFields {
                    computer_name: s!(computer_name),
                    version: item.version,
                });
            }
        };

        let is_latest = self.expected_version.as_ref().map(|expected| *expected <= observed);
        Ok(VerdictRecord {
            computer_name: s!(computer_name),
            channel: self.channel.clone(),
            requires_update: is_latest.map(|latest| !latest),
            expected_build: self.expected_build.clone(),
            observed_build: observed.to_string(),
            is_latest_version: is_latest,
            computer_id: item.computer_id,
        })
    }
}

/// Tally of an evaluated stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub up_to_date: usize,
    pub requires_update: usize,
    pub indeterminate: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn record(&mut self, verdict: &Result<VerdictRecord, InvalidInputError>) {
        match verdict {
            Ok(v) => match v.requires_update {
                Some(false) => self.up_to_date += 1,
                Some(true) => self.requires_update += 1,
                None => self.indeterminate += 1,
            },
            Err(_) => self.skipped += 1,
        }
    }
}

pub fn summarize<'v, I>(verdicts: I) -> Summary
where
    I: IntoIterator<Item = &'v Result<VerdictRecord, InvalidInputError>>,
{
    let mut s = Summary::default();
    for v in verdicts {
        s.record(v);
    }
    s
}

impl From<&[VerdictRecord]> for DataSet {
    fn from(verdicts: &[VerdictRecord]) -> Self {
        let mut ds = DataSet::new(&VERDICT_HEADERS);
        for v in verdicts {
            ds.push(cells![
                v.computer_name,
                v.channel,
                opt_cell(&v.requires_update),
                opt_cell(&v.expected_build),
                v.observed_build,
                opt_cell(&v.is_latest_version),
                v.computer_id,
            ]);
        }
        ds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ReleaseVersion;

    fn release(channel: &str, build: &str, latest: bool) -> CurrentRelease {
        CurrentRelease {
            channel: s!(channel),
            version: ReleaseVersion::Number(2111),
            build: s!(build),
            release_date: None,
            supported_until: None,
            is_latest_build: latest,
        }
    }

    #[test]
    fn newer_than_expected_is_latest() {
        let checker = UpdateChecker::with_catalog(vec![release("Beta Channel", "14701.20164", true)]);
        let out: Vec<_> = checker
            .evaluate("Beta Channel", [InstalledSoftware::new("PC9", "9", "16.0.14800.10000")])
            .unwrap()
            .collect();
        let v = out[0].as_ref().unwrap();
        assert_eq!(v.is_latest_version, Some(true));
        assert_eq!(v.requires_update, Some(false));
        assert_eq!(v.observed_build, "14800.10000");
    }

    #[test]
    fn three_part_version_is_rejected() {
        let checker = UpdateChecker::with_catalog(vec![]);
        let out: Vec<_> = checker
            .evaluate("Beta Channel", [InstalledSoftware::new("PC1", "1", "16.0.14701")])
            .unwrap()
            .collect();
        assert!(matches!(out[0], Err(InvalidInputError::MissingBuildFields { .. })));
    }

    #[test]
    fn unreadable_expected_build_is_indeterminate() {
        let checker = UpdateChecker::with_catalog(vec![release("Beta Channel", "TBD", true)]);
        let v = checker
            .evaluate("Beta Channel", [InstalledSoftware::new("PC1", "1", "16.0.1.2")])
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(v.expected_build.as_deref(), Some("TBD"));
        assert_eq!(v.requires_update, None);
    }

    #[test]
    fn one_checker_serves_several_threads() {
        let checker = UpdateChecker::with_catalog(vec![release("Beta Channel", "14701.20164", true)]);
        std::thread::scope(|scope| {
            for version in ["16.0.14701.20164", "16.0.14600.1"] {
                let checker = &checker;
                scope.spawn(move || {
                    let n = checker
                        .evaluate("Beta Channel", [InstalledSoftware::new("PC", "", version)])
                        .unwrap()
                        .filter(|v| v.is_ok())
                        .count();
                    assert_eq!(n, 1);
                });
            }
        });
    }

    #[test]
    fn summary_counts_each_outcome() {
        let ok = |r: Option<bool>| -> Result<VerdictRecord, InvalidInputError> {
            Ok(VerdictRecord {
                computer_name: s!("X"),
                channel: s!("C"),
                requires_update: r,
                expected_build: None,
                observed_build: s!("1.2"),
                is_latest_version: r.map(|b| !b),
                computer_id: s!(),
            })
        };
        let all = vec![
            ok(Some(false)),
            ok(Some(true)),
            ok(Some(true)),
            ok(None),
            Err(InvalidInputError::EmptyComputerName { version: s!("1") }),
        ];
        let s = summarize(&all);
        assert_eq!(s, Summary { up_to_date: 1, requires_update: 2, indeterminate: 1, skipped: 1 });
    }
}

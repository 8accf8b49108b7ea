// tests/export_e2e.rs
mod common;

use std::fs;

use common::{current_page, tmp_dir, urls, FixtureFetcher, CURRENT_URL};
use office_channel::catalog::{CatalogBuilder, VersionFamily};
use office_channel::checker::{InstalledSoftware, UpdateChecker, VerdictRecord};
use office_channel::config::options::{ExportFormat, ExportOptions};
use office_channel::csv::parse_rows;
use office_channel::data::DataSet;
use office_channel::file::{self, Written};
use office_channel::inventory;
use office_channel::store::CachingFetcher;

#[test]
fn inventory_to_verdict_file() {
    let dir = tmp_dir("verdicts");
    let inv = dir.join("fleet.csv");
    fs::write(
        &inv,
        "\u{feff}ComputerName,Version,ComputerId\nPC1,16.0.14701.20164,11\nPC2,16.0.14527.20312,12\n,16.0.1.2,13\n",
    )
    .unwrap();

    let items = inventory::load(&inv).unwrap();
    assert_eq!(items.len(), 3);

    let fetcher = FixtureFetcher::default().with(CURRENT_URL, &current_page());
    let checker = UpdateChecker::new(CatalogBuilder::new(fetcher, urls()));
    let verdicts: Vec<VerdictRecord> = checker
        .evaluate("Monthly Enterprise Channel", items)
        .unwrap()
        .filter_map(Result::ok)
        .collect();

    let export = ExportOptions { format: ExportFormat::Tsv, include_headers: true, out: Some(dir.clone()) };
    let written = file::write_export(&export, "verdicts", &DataSet::from(verdicts.as_slice())).unwrap();
    let path = dir.join("verdicts.tsv");
    assert_eq!(written, Written::File(path.clone()));

    let rows = parse_rows(&fs::read_to_string(&path).unwrap(), '\t');
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], "ComputerName");
    assert_eq!(rows[1], ["PC1", "Monthly Enterprise Channel", "false", "14701.20164", "14701.20164", "true", "11"]);
    assert_eq!(rows[2][2], "true");
}

#[test]
fn catalog_export_without_headers() {
    let dir = tmp_dir("catalog");
    let target = dir.join("nested").join("current.txt");
    let b = CatalogBuilder::new(FixtureFetcher::default().with(CURRENT_URL, &current_page()), urls());
    let catalog = b.build(VersionFamily::Current).unwrap();

    let export = ExportOptions { format: ExportFormat::Csv, include_headers: false, out: Some(target.clone()) };
    file::write_export(&export, "catalog_current", &DataSet::from(&catalog)).unwrap();

    let rows = parse_rows(&fs::read_to_string(&target).unwrap(), ',');
    assert_eq!(rows.len(), catalog.len());
    assert_eq!(rows[0][0], "Monthly Enterprise Channel");
}

#[test]
fn cached_pages_are_served_from_disk() {
    let dir = tmp_dir("store");
    let live = FixtureFetcher::default().with(CURRENT_URL, &current_page());
    let cache = CachingFetcher::new(&live, &dir);
    let b = CatalogBuilder::new(&cache, urls());

    let first = b.build(VersionFamily::Current).unwrap();
    let second = b.build(VersionFamily::Current).unwrap();
    assert_eq!(first, second);
    assert_eq!(live.calls(), 1);
    assert!(cache.path_for(CURRENT_URL).is_file());

    let refreshing = CachingFetcher::new(&live, &dir).refresh(true);
    CatalogBuilder::new(&refreshing, urls()).build(VersionFamily::Current).unwrap();
    assert_eq!(live.calls(), 2);
}

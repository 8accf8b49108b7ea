// src/catalog/mod.rs
//! Release catalogs: scraped rows coerced into typed, family-specific records.
//!
//! - `family`  – which table (legacy 2016 vs. current subscription) and where it lives.
//! - `records` – the typed record per family, plus their export shape.
//! - `builder` – fetch → extract → coerce → tag the latest build per channel.
mod builder;
mod family;
mod records;

pub use builder::{
    coerce_current, coerce_legacy, parse_catalog, parse_release_date, released_on, tag_latest_builds,
    CatalogBuilder,
};
pub use family::{SourceUrls, VersionFamily};
pub use records::{Catalog, CurrentRelease, LegacyRelease, ReleaseVersion, CURRENT_HEADERS, LEGACY_HEADERS};

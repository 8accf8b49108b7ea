// src/lib.rs
//! Scrape the vendor's Office release tables into typed catalogs and check installed builds
//! against the latest build of their update channel.

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod catalog;
pub mod channels;
pub mod checker;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod error;
pub mod file;
pub mod inventory;
pub mod specs;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use catalog::{Catalog, CatalogBuilder, CurrentRelease, LegacyRelease, VersionFamily};
pub use checker::{InstalledSoftware, UpdateChecker, VerdictRecord};
pub use crate::core::{BuildVersion, HttpFetcher, PageFetcher};
pub use specs::{extract, GenericRecord};

// src/specs/mod.rs
//! # Page reading
//!
//! Everything that knows how to read vendor HTML lives here and only here.
//!
//! ## What lives here
//! - **Pure HTML parsing** of an already-fetched page body. No networking: callers hand in
//!   the text, so every reader is testable offline against captured or synthetic fixtures.
//! - **Tolerant extraction** on top of `core::html` (case-insensitive, boundary-aware tag
//!   blocks, unclosed cells) and `core::sanitize` (entities).
//!
//! ## What does **not** live here
//! - Fetching and caching (`core::net`, `store`).
//! - Column meaning, type coercion and the latest-build computation (`catalog`).
//! - Export formatting (`csv`, `file`).
//!
//! ## Typical call chain
//! ```text
//! catalog::CatalogBuilder::build → PageFetcher::fetch → specs::table::extract → coercion
//! ```
pub mod table;

pub use table::{extract, extract_all, GenericRecord, TableRecords};

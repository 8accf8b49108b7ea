// src/core/mod.rs

pub mod html;
pub mod net;
pub mod sanitize;
pub mod version;

pub use net::{HttpFetcher, PageFetcher};
pub use version::BuildVersion;

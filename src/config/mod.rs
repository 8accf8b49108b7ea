// src/config/mod.rs
pub mod consts;
pub mod options;
pub mod settings;

pub use options::AppOptions;
pub use settings::Settings;

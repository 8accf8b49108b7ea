// src/config/consts.rs

// Sources (one release table per version family, table index 0)
pub const LEGACY_URL: &str = "https://learn.microsoft.com/en-us/officeupdates/msp-files-office-2016";
pub const CURRENT_URL: &str =
    "https://learn.microsoft.com/en-us/officeupdates/update-history-microsoft365-apps-by-date";
pub const SOURCE_TABLE_INDEX: usize = 0;

// Net config
pub const USER_AGENT: &str = concat!("office_channel/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Local cache + log
pub const STORE_DIR: &str = ".store";
pub const PAGES_SUBDIR: &str = "pages";
pub const LOG_FILE: &str = "debug.log";

// Settings
pub const SETTINGS_FILE: &str = "office_channel.toml";

// Export
pub const DEFAULT_CATALOG_FILE: &str = "catalog";
pub const DEFAULT_VERDICTS_FILE: &str = "verdicts";

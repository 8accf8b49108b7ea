// src/catalog/family.rs
use std::fmt;
use std::str::FromStr;

use crate::config::options::SourceOptions;
use crate::error::UnsupportedFamilyError;

/// Release-table layout. Each family has its own page and its own column semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VersionFamily {
    /// Year/date-driven table of the perpetual 2016 suite.
    Legacy,
    /// Channel/build-driven table of the subscription suite.
    Current,
}

impl VersionFamily {
    pub fn name(&self) -> &'static str {
        match self {
            VersionFamily::Legacy => "legacy",
            VersionFamily::Current => "current",
        }
    }
}

impl fmt::Display for VersionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VersionFamily {
    type Err = UnsupportedFamilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "2016" => Ok(VersionFamily::Legacy),
            "current" | "365" | "m365" => Ok(VersionFamily::Current),
            _ => Err(UnsupportedFamilyError(s!(s))),
        }
    }
}

/// The page each family is scraped from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceUrls {
    pub legacy: String,
    pub current: String,
}

impl SourceUrls {
    pub fn url(&self, family: VersionFamily) -> &str {
        match family {
            VersionFamily::Legacy => &self.legacy,
            VersionFamily::Current => &self.current,
        }
    }
}

impl Default for SourceUrls {
    fn default() -> Self {
        SourceOptions::default().into()
    }
}

impl From<SourceOptions> for SourceUrls {
    fn from(o: SourceOptions) -> Self {
        Self { legacy: o.legacy_url, current: o.current_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_parse() {
        assert_eq!("2016".parse::<VersionFamily>().unwrap(), VersionFamily::Legacy);
        assert_eq!(" M365 ".parse::<VersionFamily>().unwrap(), VersionFamily::Current);
    }

    #[test]
    fn anything_else_is_unsupported() {
        let err = "2019".parse::<VersionFamily>().unwrap_err();
        assert_eq!(err.0, "2019");
    }
}

// src/core/version.rs
use std::fmt;
use std::str::FromStr;

use crate::error::VersionParseError;

/// Dotted numeric version with 2 to 4 fields (`major.minor[.build[.revision]]`).
///
/// Ordering is numeric field by field; a missing trailing field sorts below any present one,
/// so `14701.20164 < 14701.20164.0`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildVersion {
    fields: Vec<u32>,
}

impl BuildVersion {
    pub fn fields(&self) -> &[u32] {
        &self.fields
    }

    pub fn major(&self) -> u32 { self.fields[0] }
    pub fn minor(&self) -> u32 { self.fields[1] }
    pub fn build(&self) -> Option<u32> { self.fields.get(2).copied() }
    pub fn revision(&self) -> Option<u32> { self.fields.get(3).copied() }

    /// `build.revision` as a version of its own: `16.0.14701.20164` → `14701.20164`.
    /// This is the form the release tables publish builds in.
    pub fn build_revision(&self) -> Option<BuildVersion> {
        Some(BuildVersion { fields: vec![self.build()?, self.revision()?] })
    }
}

impl FromStr for BuildVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VersionParseError::Empty);
        }
        let parts: Vec<&str> = s.split('.').collect();
        if !(2..=4).contains(&parts.len()) {
            return Err(VersionParseError::FieldCount(s!(s)));
        }
        let fields = parts
            .iter()
            .map(|p| {
                let p = p.trim();
                if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(VersionParseError::Field { input: s!(s), field: s!(p) });
                }
                p.parse::<u32>()
                    .map_err(|_| VersionParseError::Field { input: s!(s), field: s!(p) })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BuildVersion { fields })
    }
}

impl fmt::Display for BuildVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 { f.write_str(".")?; }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

// src/inventory.rs
//! Installed-software source: a delimited file with one observation per line.
//!
//! ```text
//! ComputerName,Version,ComputerId
//! PC1,16.0.14701.20164,16777220
//! ```
//!
//! Column names are matched case-insensitively; a few common exports' spellings are accepted.
//! Short rows become observations with blank fields so the checker reports them.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::checker::InstalledSoftware;
use crate::csv::{parse_rows, sep_for_path};
use crate::error::InventoryError;

const NAME_COLUMNS: &[&str] = &["ComputerName", "Computer", "Name", "Name0", "MachineName"];
const VERSION_COLUMNS: &[&str] = &["Version", "DisplayVersion", "Version0", "ProductVersion"];
const ID_COLUMNS: &[&str] = &["ComputerId", "ResourceId", "Id", "MachineId"];

/// Read an inventory file; `-` reads stdin as CSV.
pub fn load(path: &Path) -> Result<Vec<InstalledSoftware>, InventoryError> {
    let io_err = |source| InventoryError::Io { path: path.to_path_buf(), source };
    let text = if path.as_os_str() == "-" {
        let mut buf = s!();
        std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        buf
    } else {
        fs::read_to_string(path).map_err(io_err)?
    };
    let items = parse(&text, sep_for_path(path))?;
    logf!("Inventory {}: {} observations", path.display(), items.len());
    Ok(items)
}

pub fn parse(text: &str, sep: char) -> Result<Vec<InstalledSoftware>, InventoryError> {
    let mut rows = parse_rows(text, sep).into_iter();
    let header = rows.next().ok_or(InventoryError::Empty)?;

    let name_ix = find_column(&header, NAME_COLUMNS).ok_or(InventoryError::MissingColumn("ComputerName"))?;
    let version_ix = find_column(&header, VERSION_COLUMNS).ok_or(InventoryError::MissingColumn("Version"))?;
    let id_ix = find_column(&header, ID_COLUMNS);

    let cell = |row: &[String], ix: usize| row.get(ix).map(|c| s!(c.trim())).unwrap_or_default();
    Ok(rows
        .map(|row| InstalledSoftware {
            computer_name: cell(&row, name_ix),
            computer_id: id_ix.map(|ix| cell(&row, ix)).unwrap_or_default(),
            version: cell(&row, version_ix),
        })
        .collect())
}

fn find_column(header: &[String], names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|n| header.iter().position(|h| h.trim().eq_ignore_ascii_case(n)))
}

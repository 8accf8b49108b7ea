// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::write_table;
use crate::data::DataSet;

/// Where an export went.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Written {
    Stdout,
    File(PathBuf),
}

/// Export `ds` according to `export`: to `export.out_path(stem)` when set, else stdout.
pub fn write_export(export: &ExportOptions, stem: &str, ds: &DataSet) -> io::Result<Written> {
    let sep = export.format.delim();
    match export.out_path(stem) {
        Some(path) => {
            write_export_to_path(&path, ds, export.include_headers, sep)?;
            logf!("Wrote {} rows to {}", ds.len(), path.display());
            Ok(Written::File(path))
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_table(&mut out, &ds.headers, &ds.rows, export.include_headers, sep)?;
            out.flush()?;
            Ok(Written::Stdout)
        }
    }
}

/// Create/truncate `path` (making parent directories) and write the table.
pub fn write_export_to_path(path: &Path, ds: &DataSet, include_headers: bool, sep: char) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let mut out = BufWriter::new(File::create(path)?);
    write_table(&mut out, &ds.headers, &ds.rows, include_headers, sep)?;
    out.flush()
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

// src/specs/table.rs
//! Generic table extraction: one `<table>` → a lazy sequence of [`GenericRecord`]s.
//!
//! Rules:
//! - A row whose **first** cell is a `<th>` is a header row. Its trimmed cell texts become the
//!   column titles for every following row (until the next header row) and it yields nothing.
//! - A data row met before any titles exist makes the extractor invent `P1..P(n+2)`, `n` being
//!   that row's cell count. The two spare titles are kept as-is; rows further down the table
//!   that run a little wider than the first one still line up.
//! - Cells past the last title, or under an empty title, are dropped.
//! - Cell text is the cell's markup minus tags, entities decoded, trimmed. Nothing else.
//! - A table nested in a cell only adds to that cell's text; its rows are not rows of this table.
//!   It still has its own index, counted by where it opens.
//!
//! No domain knowledge lives here; the catalog builder gives the columns meaning.

use crate::core::html::{
    all_blocks_ci, blank_blocks_ci, next_any_block_ci, next_tag_block_ci, strip_tags, to_lower, TagBlock,
};
use crate::core::sanitize::decode_entities;
use crate::error::ParseError;

/// One data row: column title → cell text, in column order. Titles are unique; a repeated
/// title keeps its first position and takes the later value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenericRecord {
    fields: Vec<(String, String)>,
}

impl GenericRecord {
    pub fn insert(&mut self, title: String, value: String) {
        match self.fields.iter_mut().find(|(t, _)| *t == title) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((title, value)),
        }
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.fields.iter().find(|(t, _)| t == title).map(|(_, v)| v.as_str())
    }

    /// Value under the first of `titles` present in this record.
    pub fn first_of(&self, titles: &[&str]) -> Option<&str> {
        titles.iter().find_map(|t| self.get(t))
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(t, _)| t.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize { self.fields.len() }
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GenericRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rec = GenericRecord::default();
        for (k, v) in iter {
            rec.insert(k.into(), v.into());
        }
        rec
    }
}

/// Lazy row walker over one table; see [`extract`].
pub struct TableRecords<'a> {
    html: &'a str,
    lc: String,
    pos: usize,
    limit: usize,
    titles: Vec<String>,
}

struct Cell {
    header: bool,
    text: String,
}

/// Select the `table_index`-th table (0-based, document order) of `html`.
///
/// Fails before yielding anything when that table does not exist. An existing table with no
/// data rows yields an empty sequence.
pub fn extract(html: &str, table_index: usize) -> Result<TableRecords<'_>, ParseError> {
    let mut lc = to_lower(html);
    let tables = all_blocks_ci(&lc, "table");
    let table = tables
        .get(table_index)
        .copied()
        .ok_or(ParseError::TableNotFound { index: table_index, found: tables.len() })?;

    // Rows of a table inside a cell belong to that table, not this one.
    blank_blocks_ci(&mut lc, "table", table.inner_start, table.inner_end);

    Ok(TableRecords {
        html,
        lc,
        pos: table.inner_start,
        limit: table.inner_end,
        titles: Vec::new(),
    })
}

/// [`extract`], collected.
pub fn extract_all(html: &str, table_index: usize) -> Result<Vec<GenericRecord>, ParseError> {
    Ok(extract(html, table_index)?.collect())
}

impl TableRecords<'_> {
    /// Titles currently in force (empty until a header row or the first data row).
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    fn read_cells(&self, row: TagBlock) -> Vec<Cell> {
        let mut cells = Vec::new();
        let mut pos = row.inner_start;
        while let Some((which, cell)) = next_any_block_ci(&self.lc, &["td", "th"], pos, row.inner_end) {
            pos = cell.end;
            let text = decode_entities(&strip_tags(cell.inner(self.html)));
            cells.push(Cell { header: which == 1, text: s!(text.trim()) });
        }
        cells
    }
}

impl Iterator for TableRecords<'_> {
    type Item = GenericRecord;

    fn next(&mut self) -> Option<GenericRecord> {
        loop {
            let row = next_tag_block_ci(&self.lc, "tr", self.pos, self.limit)?;
            self.pos = row.end;

            let cells = self.read_cells(row);
            let Some(first) = cells.first() else { continue };

            if first.header {
                self.titles = cells.into_iter().map(|c| c.text).collect();
                continue;
            }

            if self.titles.is_empty() {
                self.titles = (1..=cells.len() + 2).map(|i| format!("P{i}")).collect();
            }

            let record = self
                .titles
                .iter()
                .zip(cells)
                .filter(|(title, _)| !title.is_empty())
                .map(|(title, cell)| (title.clone(), cell.text))
                .collect();
            return Some(record);
        }
    }
}

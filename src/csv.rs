// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant). Blank lines are skipped.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // doubled quote
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                push_row(&mut rows, take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    // Trailing row without a final newline (quotes may be unterminated).
    row.push(field);
    push_row(&mut rows, row);
    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }
}

/// Separator implied by a file name: `.tsv` → tab, anything else → comma.
pub fn sep_for_path(path: &std::path::Path) -> char {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => '\t',
        _ => ',',
    }
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 { write!(w, "{sep}")?; }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}

/// Stream headers (when wanted) and rows to `w`.
pub fn write_table<W: Write>(
    mut w: W,
    headers: &Option<Vec<String>>,
    rows: &[Vec<String>],
    include_headers: bool,
    sep: char,
) -> io::Result<()> {
    if include_headers {
        if let Some(h) = headers {
            write_row(&mut w, h, sep)?;
        }
    }
    for r in rows {
        write_row(&mut w, r, sep)?;
    }
    Ok(())
}

/// Create a full export string from headers and rows.
pub fn to_export_string(
    headers: &Option<Vec<String>>,
    rows: &[Vec<String>],
    include_headers: bool,
    sep: char,
) -> String {
    let mut buf: Vec<u8> = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_table(&mut buf, headers, rows, include_headers, sep);
    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_fields_round_trip() {
        let headers = Some(vec![s!("Name"), s!("Note")]);
        let rows = vec![vec![s!("PC,1"), s!("say \"hi\"")]];
        let text = to_export_string(&headers, &rows, true, ',');
        assert_eq!(text, "Name,Note\n\"PC,1\",\"say \"\"hi\"\"\"\n");
        assert_eq!(parse_rows(&text, ','), vec![vec![s!("Name"), s!("Note")], rows[0].clone()]);
    }

    #[test]
    fn crlf_bom_and_blank_lines() {
        let rows = parse_rows("\u{feff}a\tb\r\n\r\nc\td", '\t');
        assert_eq!(rows, vec![vec![s!("a"), s!("b")], vec![s!("c"), s!("d")]]);
    }

    #[test]
    fn headers_can_be_left_out() {
        let headers = Some(vec![s!("A")]);
        let rows = vec![vec![s!("1")]];
        assert_eq!(to_export_string(&headers, &rows, false, ','), "1\n");
    }
}

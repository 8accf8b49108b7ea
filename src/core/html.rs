// src/core/html.rs
// Low-level tag scanning over raw HTML text.
//
// Every search runs on an ASCII-lowercased copy of the document (`to_lower`), whose byte
// offsets line up with the original, so callers slice the original with the offsets returned
// here. Tag names match on a boundary: `<th` never matches `<thead>`.

/// Byte ranges of one `<tag …>inner</tag>` block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagBlock {
    pub start: usize,
    pub inner_start: usize,
    pub inner_end: usize,
    pub end: usize,
}

impl TagBlock {
    pub fn inner<'a>(&self, s: &'a str) -> &'a str {
        &s[self.inner_start..self.inner_end]
    }
}

/// ASCII-only lowercasing; non-ASCII is left alone so offsets stay valid.
pub fn to_lower(s: &str) -> String {
    s.to_ascii_lowercase()
}

fn is_name_boundary(b: Option<&u8>) -> bool {
    matches!(b, Some(c) if c.is_ascii_whitespace() || *c == b'>' || *c == b'/')
}

fn find_marker(lc: &str, marker: &str, from: usize, limit: usize) -> Option<usize> {
    let mut pos = from;
    while pos < limit {
        let at = lc.get(pos..limit)?.find(marker)? + pos;
        let after = at + marker.len();
        if is_name_boundary(lc.as_bytes().get(after)) {
            return Some(at);
        }
        pos = after;
    }
    None
}

/// Offset of the next `<name` opener in `lc[from..limit]`.
pub fn find_open_tag(lc: &str, name: &str, from: usize, limit: usize) -> Option<usize> {
    find_marker(lc, &join!("<", name), from, limit)
}

/// Offset of the next `</name` closer in `lc[from..limit]`.
pub fn find_close_tag(lc: &str, name: &str, from: usize, limit: usize) -> Option<usize> {
    find_marker(lc, &join!("</", name), from, limit)
}

/// Offset just past the `>` that ends the tag starting at `at`.
fn tag_end(lc: &str, at: usize, limit: usize) -> Option<usize> {
    Some(lc.get(at..limit)?.find('>')? + at + 1)
}

/// Next `<name>` block that may omit its closing tag: it ends at its own `</name>`, or at the
/// next `<name` opener, or at `limit`, whichever comes first. Suits `<tr>`, `<td>` and `<th>`.
pub fn next_tag_block_ci(lc: &str, name: &str, from: usize, limit: usize) -> Option<TagBlock> {
    let start = find_open_tag(lc, name, from, limit)?;
    let inner_start = tag_end(lc, start, limit)?;
    let close = find_close_tag(lc, name, inner_start, limit);
    let next_open = find_open_tag(lc, name, inner_start, limit);
    Some(close_block(lc, start, inner_start, close, next_open, limit))
}

/// Next block opened by any of `names`; the block also ends at an opener of any of them.
/// Returns the index into `names` of the tag that opened it.
pub fn next_any_block_ci(lc: &str, names: &[&str], from: usize, limit: usize) -> Option<(usize, TagBlock)> {
    let (which, start) = names
        .iter()
        .enumerate()
        .filter_map(|(i, n)| find_open_tag(lc, n, from, limit).map(|at| (i, at)))
        .min_by_key(|&(_, at)| at)?;
    let inner_start = tag_end(lc, start, limit)?;
    let close = find_close_tag(lc, names[which], inner_start, limit);
    let next_open = names
        .iter()
        .filter_map(|n| find_open_tag(lc, n, inner_start, limit))
        .min();
    Some((which, close_block(lc, start, inner_start, close, next_open, limit)))
}

fn close_block(
    lc: &str,
    start: usize,
    inner_start: usize,
    close: Option<usize>,
    next_open: Option<usize>,
    limit: usize,
) -> TagBlock {
    match (close, next_open) {
        (Some(c), n) if n.is_none_or(|n| c < n) => {
            let end = tag_end(lc, c, limit).unwrap_or(limit);
            TagBlock { start, inner_start, inner_end: c, end }
        }
        (_, Some(n)) => TagBlock { start, inner_start, inner_end: n, end: n },
        _ => TagBlock { start, inner_start, inner_end: limit, end: limit },
    }
}

/// Block for a tag that always closes and may nest (`<table>`): depth-counted.
pub fn nested_block_ci(lc: &str, name: &str, from: usize) -> Option<TagBlock> {
    let limit = lc.len();
    let start = find_open_tag(lc, name, from, limit)?;
    let inner_start = tag_end(lc, start, limit)?;
    let mut depth = 1usize;
    let mut pos = inner_start;
    loop {
        let close = find_close_tag(lc, name, pos, limit)?;
        match find_open_tag(lc, name, pos, limit) {
            Some(open) if open < close => {
                depth += 1;
                pos = open + 1;
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    let end = tag_end(lc, close, limit).unwrap_or(limit);
                    return Some(TagBlock { start, inner_start, inner_end: close, end });
                }
                pos = close + 1;
            }
        }
    }
}

/// Every `<name>` block of the document in opener order, nested ones included.
/// An opener with no matching close ends the list.
pub fn all_blocks_ci(lc: &str, name: &str) -> Vec<TagBlock> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(block) = nested_block_ci(lc, name, pos) {
        pos = block.start + 1;
        out.push(block);
    }
    out
}

/// Overwrite every `<name>` block opened inside `lc[from..limit]` with spaces, so later scans
/// of that range only see the enclosing markup. Offsets are unchanged.
pub fn blank_blocks_ci(lc: &mut String, name: &str, from: usize, limit: usize) {
    let mut pos = from;
    while let Some(block) = nested_block_ci(lc, name, pos) {
        if block.start >= limit {
            break;
        }
        let end = block.end.min(limit);
        lc.replace_range(block.start..end, &" ".repeat(end - block.start));
        pos = end;
    }
}

/// Remove all tags `<...>`, leaving text (whitespace untouched).
/// Quoted attribute values may contain `>`.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    let mut quote: Option<char> = None;

    for ch in s.chars() {
        match (in_tag, quote, ch) {
            (false, _, '<') => in_tag = true,
            (false, _, c) => out.push(c),
            (true, None, '"' | '\'') => quote = Some(ch),
            (true, Some(q), c) if c == q => quote = None,
            (true, None, '>') => in_tag = false,
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn th_does_not_match_thead() {
        let lc = to_lower("<THEAD><TR><TH>Year</TH></TR></THEAD>");
        assert_eq!(find_open_tag(&lc, "th", 0, lc.len()), Some(11));
    }

    #[test]
    fn unclosed_cells_end_at_next_opener() {
        let doc = "<tr><td>a<td>b</tr>";
        let lc = to_lower(doc);
        let (_, first) = next_any_block_ci(&lc, &["td", "th"], 0, lc.len()).unwrap();
        assert_eq!(first.inner(doc), "a");
        let (_, second) = next_any_block_ci(&lc, &["td", "th"], first.end, lc.len()).unwrap();
        assert_eq!(second.inner(doc), "b</tr>");
    }

    #[test]
    fn tables_listed_in_opener_order() {
        let doc = "<table><tr><td><table><tr><td>x</td></tr></table></td></tr></table><table></table>";
        let blocks = all_blocks_ci(&to_lower(doc), "table");
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].inner(doc).contains("<table>"));
        assert_eq!(blocks[1].inner(doc), "<tr><td>x</td></tr>");
        assert_eq!(blocks[2].start, blocks[0].end);
    }

    #[test]
    fn blanking_hides_inner_tables() {
        let doc = "<table><tr><td>a<table><tr><td>x</td></tr></table></td><td>b</td></tr></table>";
        let mut lc = to_lower(doc);
        let outer = all_blocks_ci(&lc, "table")[0];
        blank_blocks_ci(&mut lc, "table", outer.inner_start, outer.inner_end);
        assert_eq!(lc.len(), doc.len());
        assert_eq!(lc.matches("<tr").count(), 1);
        let row = next_tag_block_ci(&lc, "tr", outer.inner_start, outer.inner_end).unwrap();
        assert!(row.inner(doc).ends_with("<td>b</td>"));
    }

    #[test]
    fn strip_tags_keeps_text_and_spacing() {
        assert_eq!(strip_tags(r#"<a href="x>y">KB 123</a>  4"#), "KB 123  4");
    }
}

// crates/agenticops-core/src/transcript.rs
// Remove markdown tables that will be rendered as interactive tables instead

use agenticops_types::TableData;

fn is_table_line(line: &str) -> bool {
    let t = line.trim();
    t.len() >= 2 && t.starts_with('|') && t.ends_with('|')
}

fn is_separator_line(line: &str) -> bool {
    is_table_line(line)
        && line.contains('-')
        && line
            .trim()
            .chars()
            .all(|c| matches!(c, '-' | ':' | '|') || c.is_whitespace())
}

fn header_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn matches_any(header: &str, tables: &[TableData]) -> bool {
    let headers = header_cells(header);
    tables.iter().any(|td| {
        td.columns.len() == headers.len()
            && td
                .columns
                .iter()
                .zip(&headers)
                .all(|(col, h)| col.to_lowercase() == *h)
    })
}

/// Drop every markdown table whose header row matches the columns of an
/// attached table (case-insensitive, same column count). Other text is
/// returned unchanged.
pub fn strip_matching_tables(content: &str, tables: &[TableData]) -> String {
    if tables.is_empty() {
        return content.to_string();
    }

    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let mut out = String::with_capacity(content.len());
    let mut i = 0;

    while i < lines.len() {
        let starts_table = is_table_line(lines[i])
            && lines.get(i + 1).is_some_and(|next| is_separator_line(next));
        if !starts_table {
            out.push_str(lines[i]);
            i += 1;
            continue;
        }

        let mut end = i + 2;
        while end < lines.len() && is_table_line(lines[end]) {
            end += 1;
        }

        if !matches_any(lines[i], tables) {
            for line in &lines[i..end] {
                out.push_str(line);
            }
        }
        i = end;
    }
    out
}

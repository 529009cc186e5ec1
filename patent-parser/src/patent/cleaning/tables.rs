//! HTML table normalization
//!
//! Layout engines emit tables as raw HTML. Each `<table>...</table>` span is replaced with one
//! pipe-delimited line per row, and a `| --- |` separator after the first row:
//!
//! ```text
//! <table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>
//!
//! | a | b |
//! | --- | --- |
//! | c | d |
//! ```
//!
//! Tags are matched case-sensitively and may span lines. Row widths are not validated: the
//! separator always has as many columns as the first row. A table with no rows at all is
//! dropped.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<table\b[^>]*>(.*?)</table>").unwrap());

static ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<tr\b[^>]*>(.*?)</tr>").unwrap());

static CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<t[hd]\b[^>]*>(.*?)</t[hd]>").unwrap());

/// Replace every HTML table in `text` with its pipe-delimited rendering
pub fn normalize_tables(text: &str) -> String {
    TABLE
        .replace_all(text, |caps: &Captures| {
            let rows = table_rows(&caps[1]);
            if rows.is_empty() {
                log::debug!("dropping table with no rows");
            }
            render_table(&rows)
        })
        .into_owned()
}

/// Cells of every row in the inner markup of one table, each cell trimmed
pub fn table_rows(table_inner: &str) -> Vec<Vec<String>> {
    ROW.captures_iter(table_inner)
        .map(|row| {
            CELL.captures_iter(&row[1])
                .map(|cell| cell[1].trim().to_string())
                .collect()
        })
        .collect()
}

/// Render rows as pipe-delimited lines with a separator after the first row
pub fn render_table(rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (index, row) in rows.iter().enumerate() {
        lines.push(pipe_row(row.iter().map(String::as_str)));
        if index == 0 {
            lines.push(pipe_row(row.iter().map(|_| "---")));
        }
    }
    lines.join("\n")
}

fn pipe_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    format!("| {} |", cells.collect::<Vec<_>>().join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_by_two_table() {
        let html = "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>";
        assert_eq!(
            normalize_tables(html),
            "| a | b |\n| --- | --- |\n| c | d |"
        );
    }

    #[test]
    fn test_header_cells_and_attributes() {
        let html = "<table border=\"1\">\n<tr><th class=\"h\"> Name </th><th>Value</th></tr>\n<tr><td>x</td><td>\n 1 \n</td></tr>\n</table>";
        insta::assert_snapshot!(normalize_tables(html), @r"
        | Name | Value |
        | --- | --- |
        | x | 1 |
        ");
    }

    #[test]
    fn test_surrounding_text_kept() {
        let text = "Results:\n<table><tr><td>1</td></tr></table>\nDone.";
        assert_eq!(normalize_tables(text), "Results:\n| 1 |\n| --- |\nDone.");
    }

    #[test]
    fn test_table_without_rows_dropped() {
        assert_eq!(normalize_tables("a<table>garbage</table>b"), "ab");
    }

    #[test]
    fn test_separator_follows_first_row_width() {
        let html = "<table><tr><td>a</td></tr><tr><td>b</td><td>c</td></tr></table>";
        assert_eq!(normalize_tables(html), "| a |\n| --- |\n| b | c |");
    }

    #[test]
    fn test_tbody_and_thead_are_not_cells() {
        let html = "<table><thead><tr><th>h</th></tr></thead><tbody><tr><td>v</td></tr></tbody></table>";
        assert_eq!(normalize_tables(html), "| h |\n| --- |\n| v |");
    }

    #[test]
    fn test_uppercase_tags_not_matched() {
        let html = "<TABLE><TR><TD>a</TD></TR></TABLE>";
        assert_eq!(normalize_tables(html), html);
    }

    #[test]
    fn test_multiple_tables() {
        let text = "<table><tr><td>1</td></tr></table> and <table><tr><td>2</td></tr></table>";
        assert_eq!(
            normalize_tables(text),
            "| 1 |\n| --- | and | 2 |\n| --- |"
        );
    }

    #[test]
    fn test_unclosed_table_left_alone() {
        let text = "<table><tr><td>a</td></tr>";
        assert_eq!(normalize_tables(text), text);
    }
}

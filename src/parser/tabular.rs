//! `tabular` body parsing: rows, rules and `\multicolumn` cells.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use super::read_brace_group;
use crate::model::{Alignment, ColumnSpec, Table, TableCell, TableRow};

const ROW_SEPARATOR: &str = r"\\";
const RULE_TOKENS: [&str; 4] = [r"\hline", r"\toprule", r"\midrule", r"\bottomrule"];

fn rule_regex() -> &'static Regex {
    static RULE: OnceLock<Regex> = OnceLock::new();
    RULE.get_or_init(|| {
        Regex::new(r"\\(?:hline|toprule|midrule|bottomrule)\b").expect("rule pattern")
    })
}

fn cline_regex() -> &'static Regex {
    static CLINE: OnceLock<Regex> = OnceLock::new();
    CLINE.get_or_init(|| Regex::new(r"\\cline\s*\{[^}]*\}").expect("cline pattern"))
}

fn row_spacing_regex() -> &'static Regex {
    // `\\[2pt]` leaves its length argument at the start of the next part.
    static SPACING: OnceLock<Regex> = OnceLock::new();
    SPACING.get_or_init(|| Regex::new(r"^\s*\[[^\]]*\]").expect("row spacing pattern"))
}

fn multicolumn_regex() -> &'static Regex {
    static MULTICOLUMN: OnceLock<Regex> = OnceLock::new();
    MULTICOLUMN.get_or_init(|| {
        Regex::new(r"\\multicolumn\s*\{\s*(\d+)\s*\}\s*\{([^}]*)\}\s*").expect("multicolumn pattern")
    })
}

/// Parse a `tabular` environment into a [`Table`].
///
/// The border-aware parse runs first. If it recovers no rows, or meets a
/// rule token in the middle of a row, the simple parse is used instead:
/// it splits on `\\`, drops every rule token and ignores borders.
pub fn parse_tabular(spec: &str, body: &str) -> Table {
    let mut table = Table::new(ColumnSpec::parse(spec));

    match parse_rows_with_borders(body) {
        Some(rows) if !rows.is_empty() => table.rows = rows,
        _ => {
            log::debug!("tabular: border-aware parse failed, using simple row split");
            table.rows = parse_rows_simple(body);
            table.fallback = true;
        }
    }

    table
}

fn row_parts(body: &str) -> impl Iterator<Item = String> + '_ {
    body.split(ROW_SEPARATOR).map(|part| {
        let part = row_spacing_regex().replace(part, "");
        cline_regex().replace_all(&part, "").into_owned()
    })
}

fn parse_rows_with_borders(body: &str) -> Option<Vec<TableRow>> {
    let mut rows: Vec<TableRow> = Vec::new();
    let mut pending_top = false;

    for part in row_parts(body) {
        let (leading, rest) = strip_leading_rules(&part);
        let (trailing, content) = strip_trailing_rules(rest);

        if content.trim().is_empty() {
            if leading || trailing {
                if let Some(prev) = rows.last_mut() {
                    prev.has_bottom_border = true;
                }
                pending_top = true;
            }
            continue;
        }

        if rule_regex().is_match(content) {
            return None;
        }

        if leading {
            if let Some(prev) = rows.last_mut() {
                prev.has_bottom_border = true;
            }
        }

        let mut row = TableRow::new(split_cells(content));
        row.has_top_border = pending_top || leading;
        row.has_bottom_border = trailing;
        pending_top = trailing;
        rows.push(row);
    }

    Some(rows)
}

fn parse_rows_simple(body: &str) -> Vec<TableRow> {
    row_parts(body)
        .filter_map(|part| {
            let stripped = rule_regex().replace_all(&part, "");
            let content = stripped.trim();
            if content.is_empty() {
                None
            } else {
                Some(TableRow::new(split_cells(content)))
            }
        })
        .collect()
}

fn starts_with_rule(text: &str) -> Option<usize> {
    RULE_TOKENS.iter().find_map(|token| {
        let rest = text.strip_prefix(token)?;
        match rest.chars().next() {
            Some(c) if c.is_ascii_alphabetic() => None,
            _ => Some(token.len()),
        }
    })
}

fn strip_leading_rules(text: &str) -> (bool, &str) {
    let mut found = false;
    let mut rest = text.trim_start();
    while let Some(len) = starts_with_rule(rest) {
        found = true;
        rest = rest[len..].trim_start();
    }
    (found, rest)
}

fn strip_trailing_rules(text: &str) -> (bool, &str) {
    let mut found = false;
    let mut rest = text.trim_end();
    while let Some(token) = RULE_TOKENS.iter().find(|t| rest.ends_with(*t)) {
        found = true;
        rest = rest[..rest.len() - token.len()].trim_end();
    }
    (found, rest)
}

struct Multicolumn {
    span: u16,
    alignment: Alignment,
    content: String,
}

fn placeholder(index: usize) -> String {
    format!("\u{0}MC{}\u{0}", index)
}

/// Replace each `\multicolumn{n}{align}{content}` with a placeholder that
/// cannot contain a cell separator. An unbalanced content group ends the
/// extraction and leaves the remaining text literal.
fn extract_multicolumns(row: &str) -> (String, HashMap<String, Multicolumn>) {
    let mut output = String::with_capacity(row.len());
    let mut found = HashMap::new();
    let mut cursor = 0;

    while let Some(caps) = multicolumn_regex().captures_at(row, cursor) {
        let (Some(whole), Some(span), Some(align)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            break;
        };
        let Some((content, after)) = read_brace_group(row, whole.end()) else {
            log::debug!("tabular: unbalanced \\multicolumn content, left literal");
            break;
        };

        let key = placeholder(found.len());
        output.push_str(&row[cursor..whole.start()]);
        output.push_str(&key);
        found.insert(
            key,
            Multicolumn {
                span: span.as_str().parse::<u16>().unwrap_or(1).max(1),
                alignment: Alignment::from_spec(align.as_str()),
                content: content.trim().to_string(),
            },
        );
        cursor = after;
    }

    output.push_str(&row[cursor..]);
    (output, found)
}

fn entity_len(text: &str) -> Option<usize> {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    let entity = ENTITY.get_or_init(|| {
        Regex::new(r"^&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").expect("entity pattern")
    });
    entity.find(text).map(|m| m.end())
}

/// Split a row on `&`. `\&` and HTML entities such as `&nbsp;` are not
/// separators and are kept as written.
fn split_raw_cells(row: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut rest = row;

    while let Some(ch) = rest.chars().next() {
        if ch == '\\' && rest[1..].starts_with('&') {
            current.push_str(r"\&");
            rest = &rest[2..];
            continue;
        }
        if ch == '&' {
            if let Some(len) = entity_len(rest) {
                current.push_str(&rest[..len]);
                rest = &rest[len..];
            } else {
                cells.push(std::mem::take(&mut current));
                rest = &rest[1..];
            }
            continue;
        }
        current.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    cells.push(current);
    cells
}

fn split_cells(row: &str) -> Vec<TableCell> {
    let (row, multicolumns) = extract_multicolumns(row);

    split_raw_cells(&row)
        .into_iter()
        .map(|raw| {
            let mut text = raw.trim().to_string();
            let mut attributes = None;
            for index in 0..multicolumns.len() {
                let key = placeholder(index);
                if let Some(mc) = multicolumns.get(&key).filter(|_| text.contains(&key)) {
                    text = text.replace(&key, &mc.content);
                    attributes.get_or_insert((mc.span, mc.alignment));
                }
            }
            match attributes {
                Some((span, alignment)) => TableCell::text(text.trim())
                    .colspan(span)
                    .align(alignment),
                None => TableCell::text(text),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(row: &TableRow) -> Vec<&str> {
        row.cells.iter().map(|c| c.content.as_str()).collect()
    }

    #[test]
    fn test_single_row_with_borders() {
        let table = parse_tabular("|c|c|", r"\hline A & B \\ \hline");
        assert!(table.is_bordered());
        assert!(!table.fallback);
        assert_eq!(table.row_count(), 1);
        let row = &table.rows[0];
        assert_eq!(contents(row), vec!["A", "B"]);
        assert!(row.has_top_border);
        assert!(row.has_bottom_border);
    }

    #[test]
    fn test_hline_between_rows_marks_both() {
        let table = parse_tabular("cc", r"a & b \\ \hline c & d \\ e & f");
        assert_eq!(table.row_count(), 3);
        assert!(!table.rows[0].has_top_border);
        assert!(table.rows[0].has_bottom_border);
        assert!(table.rows[1].has_top_border);
        assert!(!table.rows[1].has_bottom_border);
        assert!(!table.rows[2].has_top_border);
    }

    #[test]
    fn test_trailing_rule_inside_part() {
        let table = parse_tabular("cc", r"a & b \hline \\ c & d");
        assert!(table.rows[0].has_bottom_border);
        assert!(table.rows[1].has_top_border);
    }

    #[test]
    fn test_booktabs_rules() {
        let table = parse_tabular("ll", r"\toprule x & y \\ \midrule 1 & 2 \\ \bottomrule");
        assert_eq!(table.row_count(), 2);
        assert!(table.rows[0].has_top_border);
        assert!(table.rows[0].has_bottom_border);
        assert!(table.rows[1].has_bottom_border);
    }

    #[test]
    fn test_multicolumn_single_cell() {
        let table = parse_tabular("|c|c|", r"\multicolumn{2}{c}{Merged} \\ A & B");
        assert_eq!(table.row_count(), 2);
        let first = &table.rows[0];
        assert_eq!(first.cells.len(), 1);
        assert_eq!(first.cells[0].content, "Merged");
        assert_eq!(first.cells[0].colspan, 2);
        assert_eq!(first.cells[0].alignment, Alignment::Center);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_multicolumn_protects_ampersand() {
        let table = parse_tabular("ccc", r"\multicolumn{2}{|l|}{x \& y} & z");
        let row = &table.rows[0];
        assert_eq!(row.cells.len(), 2);
        assert_eq!(row.cells[0].content, r"x \& y");
        assert_eq!(row.cells[0].alignment, Alignment::Left);
        assert_eq!(row.cells[1].content, "z");
    }

    #[test]
    fn test_multicolumn_nested_braces() {
        let table = parse_tabular("cc", r"\multicolumn{2}{r}{$\frac{a}{b}$}");
        assert_eq!(table.rows[0].cells[0].content, r"$\frac{a}{b}$");
        assert_eq!(table.rows[0].cells[0].alignment, Alignment::Right);
    }

    #[test]
    fn test_unbalanced_multicolumn_left_literal() {
        let table = parse_tabular("cc", r"\multicolumn{2}{c}{open & b");
        let row = &table.rows[0];
        assert_eq!(row.cells.len(), 2);
        assert!(row.cells.iter().all(|c| c.colspan == 1));
    }

    #[test]
    fn test_entities_are_not_separators() {
        let table = parse_tabular("cc", "a&nbsp;b & c &lt; d");
        assert_eq!(contents(&table.rows[0]), vec!["a&nbsp;b", "c &lt; d"]);
    }

    #[test]
    fn test_escaped_ampersand_kept_verbatim() {
        let table = parse_tabular("cc", r"$a \& b$ & x \& y");
        assert_eq!(contents(&table.rows[0]), vec![r"$a \& b$", r"x \& y"]);
    }

    #[test]
    fn test_empty_cells_kept() {
        let table = parse_tabular("ccc", "a & & c");
        assert_eq!(contents(&table.rows[0]), vec!["a", "", "c"]);
    }

    #[test]
    fn test_row_spacing_and_cline_dropped() {
        let table = parse_tabular("cc", r"a & b \\[2pt] \cline{1-2} c & d");
        assert_eq!(table.row_count(), 2);
        assert_eq!(contents(&table.rows[1]), vec!["c", "d"]);
    }

    #[test]
    fn test_mid_row_rule_uses_fallback() {
        let table = parse_tabular("|c|c|", r"a \hline & b \\ c & d");
        assert!(table.fallback);
        assert_eq!(table.row_count(), 2);
        assert_eq!(contents(&table.rows[0]), vec!["a", "b"]);
        assert!(table
            .rows
            .iter()
            .all(|r| !r.has_top_border && !r.has_bottom_border));
    }

    #[test]
    fn test_paths_agree_on_well_formed_cells() {
        let body = r"\hline 1 & 2 \\ \hline 3 & \multicolumn{1}{r}{4} \\ \hline";
        let bordered = parse_rows_with_borders(body).unwrap();
        let simple = parse_rows_simple(body);
        assert_eq!(bordered.len(), simple.len());
        for (a, b) in bordered.iter().zip(&simple) {
            assert_eq!(a.cells, b.cells);
        }
    }

    #[test]
    fn test_empty_body() {
        let table = parse_tabular("c", "  ");
        assert!(table.is_empty());
        assert!(table.fallback);
    }
}

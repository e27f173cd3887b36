//! HTML emission helpers.

use std::fmt::Write as _;

use crate::model::{MathKind, Table, TableRow};

/// KaTeX stylesheet linked from standalone pages.
pub const KATEX_CSS_URL: &str = "https://cdn.jsdelivr.net/npm/katex@0.16.22/dist/katex.min.css";

/// Opening tag of the centered container.
pub const CENTER_OPEN: &str = r#"<div class="latex-center" style="text-align: center;">"#;

/// Closing tag of the centered container.
pub const CENTER_CLOSE: &str = "</div>";

const BORDER: &str = "1px solid currentColor";

/// Escape text for use inside a double-quoted attribute value.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap typeset markup in the math span carrying its source.
pub fn write_math_span(out: &mut String, kind: MathKind, body: &str, markup: &str) {
    let _ = write!(
        out,
        r#"<span class="math-{}" data-latex="{}">{}</span>"#,
        kind.as_str(),
        escape_attribute(body),
        markup
    );
}

/// Write a table. `render_cell` turns raw cell content into HTML.
pub fn write_table<F>(out: &mut String, table: &Table, mut render_cell: F)
where
    F: FnMut(&str) -> String,
{
    out.push_str(r#"<table class="latex-table""#);
    if table.is_bordered() {
        out.push_str(r#" border="1""#);
    }
    out.push_str(r#" style="border-collapse: collapse; text-align: center;">"#);

    for row in &table.rows {
        write_row_open(out, row);
        for cell in &row.cells {
            out.push_str("<td");
            if cell.colspan > 1 {
                let _ = write!(out, r#" colspan="{}""#, cell.colspan);
            }
            if let Some(align) = cell.alignment.css() {
                let _ = write!(out, r#" style="text-align: {};""#, align);
            }
            out.push('>');
            out.push_str(&render_cell(&cell.content));
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }

    out.push_str("</table>");
}

fn write_row_open(out: &mut String, row: &TableRow) {
    let mut style = String::new();
    if row.has_top_border {
        let _ = write!(style, "border-top: {};", BORDER);
    }
    if row.has_bottom_border {
        if !style.is_empty() {
            style.push(' ');
        }
        let _ = write!(style, "border-bottom: {};", BORDER);
    }

    if style.is_empty() {
        out.push_str("<tr>");
    } else {
        let _ = write!(out, r#"<tr style="{}">"#, style);
    }
}

/// Wrap rendered content in a complete HTML page that loads the KaTeX stylesheet.
pub fn standalone_document(title: &str, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n<head>\n<meta charset=\"utf-8\">\n",
            "<title>{}</title>\n",
            "<link rel=\"stylesheet\" href=\"{}\">\n",
            "</head>\n<body>\n{}\n</body>\n</html>\n"
        ),
        escape_attribute(title),
        KATEX_CSS_URL,
        body
    )
}

//! Newline normalization.
//!
//! Newlines in running text become a line-break marker. Newlines inside an
//! HTML tag (between `<` and `>`), inside a `<td>`/`<th>` cell, or inside any
//! other element still open at that point are left alone so generated and
//! stored markup is not corrupted. The decision for each newline depends
//! only on what precedes it, tracked by a small forward state machine
//! instead of rescanning the prefix.

use std::borrow::Cow;

/// Default line-break marker: a break plus a spacing element.
pub const DEFAULT_LINE_BREAK: &str = r#"<br><span class="line-spacer"></span>"#;

/// Where the scanner currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewlineState {
    /// Running text outside any open element
    #[default]
    Text,
    /// Between `<` and `>` of a tag
    InTag,
    /// Inside the content of a `<td>` or `<th>`
    InCell,
    /// Inside the content of some other open element
    InElement,
}

/// Incremental newline normalizer.
///
/// Feed text in source order with [`NewlineNormalizer::feed`]; state carries
/// across calls so a cell opened in one chunk is still open in the next.
#[derive(Debug, Clone, Default)]
pub struct NewlineNormalizer {
    state: NewlineState,
    cell_depth: usize,
    open_elements: usize,
    tag: String,
    line_breaks: usize,
}

impl NewlineNormalizer {
    /// Create a normalizer in the `Text` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> NewlineState {
        self.state
    }

    /// Whether the scanner is inside a tag.
    pub fn in_tag(&self) -> bool {
        self.state == NewlineState::InTag
    }

    /// Number of newlines replaced so far.
    pub fn line_breaks(&self) -> usize {
        self.line_breaks
    }

    /// Normalize `text`, appending the result to `out`.
    ///
    /// Literal `\n` escape sequences are turned into newlines first.
    pub fn feed(&mut self, text: &str, marker: &str, out: &mut String) {
        let text = expand_escaped_newlines(text);
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            match self.state {
                NewlineState::Text | NewlineState::InCell | NewlineState::InElement => match ch {
                    '<' if chars.peek().is_some_and(|&c| starts_tag(c)) => {
                        self.state = NewlineState::InTag;
                        self.tag.clear();
                        out.push(ch);
                    }
                    '\n' if self.state == NewlineState::Text => {
                        self.line_breaks += 1;
                        out.push_str(marker);
                    }
                    _ => out.push(ch),
                },
                NewlineState::InTag => {
                    if ch == '>' {
                        self.close_tag();
                    } else {
                        self.tag.push(ch);
                    }
                    out.push(ch);
                }
            }
        }
    }

    fn close_tag(&mut self) {
        let tag = self.tag.trim();
        let (closing, rest) = match tag.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, tag),
        };
        let name_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        let name = &rest[..name_len];
        let is_cell = name.eq_ignore_ascii_case("td") || name.eq_ignore_ascii_case("th");

        // Comments, doctypes, void and self-closing tags open nothing.
        if !name.is_empty() {
            if closing {
                self.open_elements = self.open_elements.saturating_sub(1);
                if is_cell {
                    self.cell_depth = self.cell_depth.saturating_sub(1);
                }
            } else if !tag.ends_with('/') && !is_void_element(name) {
                self.open_elements += 1;
                if is_cell {
                    self.cell_depth += 1;
                }
            }
        }

        self.tag.clear();
        self.state = if self.cell_depth > 0 {
            NewlineState::InCell
        } else if self.open_elements > 0 {
            NewlineState::InElement
        } else {
            NewlineState::Text
        };
    }
}

fn is_void_element(name: &str) -> bool {
    const VOID: [&str; 14] = [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ];
    VOID.iter().any(|v| v.eq_ignore_ascii_case(name))
}

fn starts_tag(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '/' || c == '!'
}

/// Turn literal two-character `\n` sequences into newline characters.
pub fn expand_escaped_newlines(text: &str) -> Cow<'_, str> {
    if text.contains(r"\n") {
        Cow::Owned(text.replace(r"\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Normalize a complete string with a fresh state machine.
pub fn normalize_newlines(text: &str, marker: &str) -> String {
    let mut out = String::with_capacity(text.len());
    NewlineNormalizer::new().feed(text, marker, &mut out);
    out
}

/// Replace every newline (after expanding literal `\n`) with `marker`,
/// regardless of markup context.
pub fn break_all_lines(text: &str, marker: &str) -> (String, usize) {
    let text = expand_escaped_newlines(text);
    let count = text.matches('\n').count();
    (text.replace('\n', marker), count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BR: &str = "<br>";

    #[test]
    fn test_plain_newline_replaced() {
        assert_eq!(normalize_newlines("a\nb", BR), "a<br>b");
    }

    #[test]
    fn test_literal_escape_replaced() {
        assert_eq!(normalize_newlines(r"a\nb", BR), "a<br>b");
    }

    #[test]
    fn test_newline_in_cell_kept() {
        assert_eq!(normalize_newlines("<td>a\nb</td>", BR), "<td>a\nb</td>");
        assert_eq!(
            normalize_newlines("<TH class=\"x\">a\nb</TH>\nc", BR),
            "<TH class=\"x\">a\nb</TH><br>c"
        );
    }

    #[test]
    fn test_newline_inside_tag_kept() {
        assert_eq!(
            normalize_newlines("<img\nsrc=\"a.png\">\nx", BR),
            "<img\nsrc=\"a.png\"><br>x"
        );
    }

    #[test]
    fn test_newline_inside_open_element_kept() {
        assert_eq!(normalize_newlines("<p>a\nb</p>", BR), "<p>a\nb</p>");
        assert_eq!(
            normalize_newlines("<ul>\n<li>one</li>\n</ul>\nafter", BR),
            "<ul>\n<li>one</li>\n</ul><br>after"
        );
    }

    #[test]
    fn test_void_and_self_closing_tags_open_nothing() {
        assert_eq!(normalize_newlines("a<br>\nb<hr/>\nc", BR), "a<br><br>b<hr/><br>c");
        assert_eq!(normalize_newlines("<!-- note -->\nx", BR), "<!-- note --><br>x");
    }

    #[test]
    fn test_newline_between_elements_replaced() {
        assert_eq!(normalize_newlines("<p>a</p>\n<p>b</p>", BR), "<p>a</p><br><p>b</p>");
    }

    #[test]
    fn test_less_than_in_text_is_not_a_tag() {
        assert_eq!(normalize_newlines("x < 5\ny", BR), "x < 5<br>y");
    }

    #[test]
    fn test_nested_cells() {
        let text = "<td><table><tr><td>a</td></tr></table>\nb</td>\nc";
        assert_eq!(
            normalize_newlines(text, BR),
            "<td><table><tr><td>a</td></tr></table>\nb</td><br>c"
        );
    }

    #[test]
    fn test_state_carries_across_feeds() {
        let mut normalizer = NewlineNormalizer::new();
        let mut out = String::new();
        normalizer.feed("<td>a", BR, &mut out);
        assert_eq!(normalizer.state(), NewlineState::InCell);
        normalizer.feed("\nb</td>\n", BR, &mut out);
        assert_eq!(out, "<td>a\nb</td><br>");
        assert_eq!(normalizer.line_breaks(), 1);
        assert_eq!(normalizer.state(), NewlineState::Text);
    }

    #[test]
    fn test_td_prefix_names_do_not_open_cells() {
        let mut normalizer = NewlineNormalizer::new();
        let mut out = String::new();
        normalizer.feed("<tdx>a", BR, &mut out);
        assert_eq!(normalizer.state(), NewlineState::InElement);
        normalizer.feed("</tdx>\nb", BR, &mut out);
        assert_eq!(out, "<tdx>a</tdx><br>b");
    }

    #[test]
    fn test_break_all_lines() {
        let (out, count) = break_all_lines("a\\nb\nc", BR);
        assert_eq!(out, "a<br>b<br>c");
        assert_eq!(count, 2);
    }
}

//! Source scanning: environments, tables and math regions.
//!
//! [`tokenize`] turns raw content into a flat list of [`Span`]s that the
//! renderer walks once. Environments claim their regions first; math is
//! scanned in the text between them and inside `center` bodies.

mod environment;
mod math;
mod tabular;

pub use environment::{scan_environments, Environment, EnvironmentKind};
pub use math::scan_math;
pub use tabular::parse_tabular;

use crate::model::Span;

/// Tokenize content into text, math, center and table spans.
///
/// The spans are contiguous, in source order, and cover `text` completely.
/// Math ids are unique across the whole result, including `center` bodies.
pub fn tokenize(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut next_id = 0;
    let mut cursor = 0;

    for env in scan_environments(text) {
        push_text_and_math(text, cursor, env.start, &mut next_id, &mut spans);
        spans.push(match env.kind {
            EnvironmentKind::Center { body } => {
                let mut inner = Vec::new();
                push_text_and_math(&body, 0, body.len(), &mut next_id, &mut inner);
                Span::Center {
                    start: env.start,
                    end: env.end,
                    body,
                    inner,
                }
            }
            EnvironmentKind::Tabular { spec, body } => Span::Table {
                start: env.start,
                end: env.end,
                table: parse_tabular(&spec, &body),
            },
        });
        cursor = env.end;
    }

    push_text_and_math(text, cursor, text.len(), &mut next_id, &mut spans);
    spans
}

/// Tokenize content into text and math spans only, ignoring environments.
pub fn tokenize_math(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut next_id = 0;
    push_text_and_math(text, 0, text.len(), &mut next_id, &mut spans);
    spans
}

fn push_text_and_math(
    text: &str,
    from: usize,
    to: usize,
    next_id: &mut usize,
    spans: &mut Vec<Span>,
) {
    if from >= to {
        return;
    }

    let mut cursor = from;
    for mut block in scan_math(&text[from..to]) {
        block.start += from;
        block.end += from;
        block.id = *next_id;
        *next_id += 1;

        if block.start > cursor {
            spans.push(Span::Text {
                start: cursor,
                end: block.start,
            });
        }
        cursor = block.end;
        spans.push(Span::Math(block));
    }

    if cursor < to {
        spans.push(Span::Text { start: cursor, end: to });
    }
}

/// Read a balanced `{...}` group starting at byte `open`.
///
/// Returns the content between the braces and the offset just past the
/// closing brace. Escaped braces (`\{`, `\}`) do not count.
pub(crate) fn read_brace_group(text: &str, open: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&text[open + 1..i], i + 1));
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

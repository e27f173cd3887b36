//! Math delimiter scanning.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Delimiter, MathBlock};

fn delimiter_regex(delimiter: Delimiter) -> &'static Regex {
    static PATTERNS: OnceLock<[Regex; 4]> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        [
            Regex::new(r"(?s)\\\[(.+?)\\\]").expect("bracket pattern"),
            Regex::new(r"(?s)\\\((.+?)\\\)").expect("paren pattern"),
            Regex::new(r"(?s)\$\$(.+?)\$\$").expect("double dollar pattern"),
            // Inline dollars stay on one line so a stray `$` cannot swallow a paragraph.
            Regex::new(r"\$([^$\n]+?)\$").expect("dollar pattern"),
        ]
    });
    match delimiter {
        Delimiter::Bracket => &patterns[0],
        Delimiter::Paren => &patterns[1],
        Delimiter::DoubleDollar => &patterns[2],
        Delimiter::Dollar => &patterns[3],
    }
}

/// Find every math region in `text`.
///
/// Delimiters are tried in [`Delimiter::PRIORITY`] order; a match that
/// overlaps an already accepted block is discarded. The result is sorted by
/// start offset, ids follow that order, and no two blocks overlap.
pub fn scan_math(text: &str) -> Vec<MathBlock> {
    let mut accepted: Vec<MathBlock> = Vec::new();

    for delimiter in Delimiter::PRIORITY {
        for caps in delimiter_regex(delimiter).captures_iter(text) {
            let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let (start, end) = (whole.start(), whole.end());
            if accepted.iter().any(|b| b.overlaps(start, end)) {
                continue;
            }
            accepted.push(MathBlock {
                id: 0,
                body: body.as_str().to_string(),
                start,
                end,
                kind: delimiter.kind(),
                delimiter,
            });
        }
    }

    accepted.sort_by_key(|b| b.start);
    for (id, block) in accepted.iter_mut().enumerate() {
        block.id = id;
    }
    accepted
}

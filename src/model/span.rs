//! Tokenizer output: a flat list of typed source spans.

use super::{MathBlock, Table};
use serde::{Deserialize, Serialize};

/// A typed region of source content.
///
/// Offsets are byte positions into the text that was tokenized. Spans
/// produced for one input are contiguous and cover it completely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Span {
    /// Plain text, possibly containing HTML markup
    Text {
        /// Start offset
        start: usize,
        /// End offset (exclusive)
        end: usize,
    },

    /// A delimited math region
    Math(MathBlock),

    /// A `center` environment; `inner` is tokenized relative to `body`
    Center {
        /// Start offset of `\begin{center}`
        start: usize,
        /// End offset just past `\end{center}`
        end: usize,
        /// Environment body as written
        body: String,
        /// Spans of `body`
        inner: Vec<Span>,
    },

    /// A `tabular` environment
    Table {
        /// Start offset of `\begin{tabular}`
        start: usize,
        /// End offset just past `\end{tabular}`
        end: usize,
        /// Parsed table
        table: Table,
    },
}

impl Span {
    /// Start offset.
    pub fn start(&self) -> usize {
        match self {
            Span::Text { start, .. } | Span::Center { start, .. } | Span::Table { start, .. } => {
                *start
            }
            Span::Math(block) => block.start,
        }
    }

    /// End offset (exclusive).
    pub fn end(&self) -> usize {
        match self {
            Span::Text { end, .. } | Span::Center { end, .. } | Span::Table { end, .. } => *end,
            Span::Math(block) => block.end,
        }
    }

    /// Source slice covered by this span.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start()..self.end()]
    }

    /// Whether this is a text span.
    pub fn is_text(&self) -> bool {
        matches!(self, Span::Text { .. })
    }

    /// Whether this is a math span.
    pub fn is_math(&self) -> bool {
        matches!(self, Span::Math(_))
    }
}

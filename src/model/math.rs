//! Math region types.

use serde::{Deserialize, Serialize};

/// How a math region is typeset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathKind {
    /// Rendered within a line of text
    Inline,
    /// Rendered on its own centered line
    Display,
}

impl MathKind {
    /// CSS class suffix used on the wrapping span (`math-inline`, `math-display`).
    pub fn as_str(&self) -> &'static str {
        match self {
            MathKind::Inline => "inline",
            MathKind::Display => "display",
        }
    }

    /// Whether the typesetter should run in display mode.
    pub fn is_display(&self) -> bool {
        matches!(self, MathKind::Display)
    }
}

/// Delimiter pair that introduced a math region.
///
/// Variants are declared in scan priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    /// `\[ ... \]`
    Bracket,
    /// `\( ... \)`
    Paren,
    /// `$$ ... $$`
    DoubleDollar,
    /// `$ ... $`
    Dollar,
}

impl Delimiter {
    /// All delimiters in the order they are scanned.
    pub const PRIORITY: [Delimiter; 4] = [
        Delimiter::Bracket,
        Delimiter::Paren,
        Delimiter::DoubleDollar,
        Delimiter::Dollar,
    ];

    /// Math kind implied by this delimiter.
    pub fn kind(&self) -> MathKind {
        match self {
            Delimiter::Bracket | Delimiter::DoubleDollar => MathKind::Display,
            Delimiter::Paren | Delimiter::Dollar => MathKind::Inline,
        }
    }

    /// Opening delimiter text.
    pub fn open(&self) -> &'static str {
        match self {
            Delimiter::Bracket => r"\[",
            Delimiter::Paren => r"\(",
            Delimiter::DoubleDollar => "$$",
            Delimiter::Dollar => "$",
        }
    }

    /// Closing delimiter text.
    pub fn close(&self) -> &'static str {
        match self {
            Delimiter::Bracket => r"\]",
            Delimiter::Paren => r"\)",
            Delimiter::DoubleDollar => "$$",
            Delimiter::Dollar => "$",
        }
    }
}

/// A delimited math region found in source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathBlock {
    /// Sequential identifier, unique within one scan
    pub id: usize,

    /// LaTeX between the delimiters, exactly as written in the source
    pub body: String,

    /// Byte offset of the opening delimiter
    pub start: usize,

    /// Byte offset just past the closing delimiter
    pub end: usize,

    /// Inline or display
    pub kind: MathKind,

    /// Delimiter pair used in the source
    pub delimiter: Delimiter,
}

impl MathBlock {
    /// Length of the region in bytes, delimiters included.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the region is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether this block's range intersects `[start, end)`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }

    /// The region as it appears in the source, delimiters included.
    pub fn source(&self) -> String {
        format!(
            "{}{}{}",
            self.delimiter.open(),
            self.body,
            self.delimiter.close()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(start: usize, end: usize) -> MathBlock {
        MathBlock {
            id: 0,
            body: "x".to_string(),
            start,
            end,
            kind: MathKind::Inline,
            delimiter: Delimiter::Dollar,
        }
    }

    #[test]
    fn test_delimiter_kinds() {
        assert_eq!(Delimiter::Bracket.kind(), MathKind::Display);
        assert_eq!(Delimiter::DoubleDollar.kind(), MathKind::Display);
        assert_eq!(Delimiter::Paren.kind(), MathKind::Inline);
        assert_eq!(Delimiter::Dollar.kind(), MathKind::Inline);
    }

    #[test]
    fn test_overlaps_half_open() {
        let b = block(2, 5);
        assert!(b.overlaps(4, 8));
        assert!(b.overlaps(0, 3));
        assert!(!b.overlaps(5, 9));
        assert!(!b.overlaps(0, 2));
    }

    #[test]
    fn test_source_roundtrips_delimiters() {
        let mut b = block(0, 3);
        b.delimiter = Delimiter::Bracket;
        b.kind = MathKind::Display;
        assert_eq!(b.source(), r"\[x\]");
    }
}

//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering content, including the HTML and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered HTML
    pub html: String,

    /// Render statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(html: String, stats: RenderStats) -> Self {
        Self { html, stats }
    }

    /// Create a result with empty statistics.
    pub fn html_only(html: String) -> Self {
        Self {
            html,
            stats: RenderStats::default(),
        }
    }

    /// Get the HTML length in bytes.
    pub fn html_len(&self) -> usize {
        self.html.len()
    }
}

/// Counters collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Inline math blocks typeset
    pub inline_math: u32,

    /// Display math blocks typeset
    pub display_math: u32,

    /// Math blocks left as source because typesetting failed
    pub failed_math: u32,

    /// Tables converted
    pub tables: u32,

    /// Tables that went through the simple parse
    pub fallback_tables: u32,

    /// Centered blocks converted
    pub centers: u32,

    /// Newlines replaced by the line-break marker
    pub line_breaks: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total math blocks seen, typeset or not.
    pub fn math_blocks(&self) -> u32 {
        self.inline_math + self.display_math + self.failed_math
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.inline_math += other.inline_math;
        self.display_math += other.display_math;
        self.failed_math += other.failed_math;
        self.tables += other.tables;
        self.fallback_tables += other.fallback_tables;
        self.centers += other.centers;
        self.line_breaks += other.line_breaks;
    }
}

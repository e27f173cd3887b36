//! Rendering options and configuration.

use super::newline::DEFAULT_LINE_BREAK;
use super::MacroTable;

/// Options for rendering rich content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Markup inserted for each newline in running text
    pub line_break: String,

    /// Control-word repairs and macro definitions for math bodies
    pub macros: MacroTable,

    /// Apply Unicode NFC normalization before tokenizing
    pub normalize_unicode: bool,

    /// Convert `center` and `tabular` environments
    pub convert_environments: bool,

    /// Typeset math regions; when off they are emitted as written
    pub render_math: bool,

    /// Collect render statistics
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line-break marker.
    pub fn with_line_break(mut self, marker: impl Into<String>) -> Self {
        self.line_break = marker.into();
        self
    }

    /// Replace the macro table.
    pub fn with_macros(mut self, macros: MacroTable) -> Self {
        self.macros = macros;
        self
    }

    /// Add a macro definition on top of the current table.
    pub fn with_macro(mut self, name: impl Into<String>, definition: impl Into<String>) -> Self {
        self.macros.add_definition(name, definition);
        self
    }

    /// Add a control-word repair on top of the current table.
    pub fn with_repair(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.macros.add_repair(from, to);
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    /// Enable or disable environment conversion.
    pub fn with_environments(mut self, enabled: bool) -> Self {
        self.convert_environments = enabled;
        self
    }

    /// Enable or disable math typesetting.
    pub fn with_math(mut self, enabled: bool) -> Self {
        self.render_math = enabled;
        self
    }

    /// Enable or disable statistics collection.
    pub fn with_stats(mut self, enabled: bool) -> Self {
        self.collect_stats = enabled;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_break: DEFAULT_LINE_BREAK.to_string(),
            macros: MacroTable::builtin().clone(),
            normalize_unicode: false,
            convert_environments: true,
            render_math: true,
            collect_stats: false,
        }
    }
}

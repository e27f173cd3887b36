//! Math typesetting backends.

use katex::OutputType;

use super::MacroTable;
use crate::error::{Error, Result};
use crate::model::MathKind;

/// Turns a prepared LaTeX body into HTML markup.
///
/// Implementations must report failures as errors rather than emitting
/// error markup: the renderer keeps the original source for failed blocks.
pub trait Typesetter: Send + Sync {
    /// Typeset `latex` in the given mode, with `macros` definitions available.
    fn typeset(&self, latex: &str, kind: MathKind, macros: &MacroTable) -> Result<String>;

    /// Name of the backend, used in log messages.
    fn name(&self) -> &str;
}

/// Markup produced by the KaTeX backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MathOutput {
    /// Visual HTML only
    Html,
    /// MathML only
    Mathml,
    /// HTML with a MathML copy for accessibility
    #[default]
    HtmlAndMathml,
}

impl From<MathOutput> for OutputType {
    fn from(output: MathOutput) -> Self {
        match output {
            MathOutput::Html => OutputType::Html,
            MathOutput::Mathml => OutputType::Mathml,
            MathOutput::HtmlAndMathml => OutputType::HtmlAndMathml,
        }
    }
}

/// KaTeX backend.
///
/// The `katex` crate keeps one JS engine per thread, created on first use.
#[derive(Debug, Clone, Default)]
pub struct KatexTypesetter {
    output: MathOutput,
}

impl KatexTypesetter {
    /// Create a KaTeX typesetter producing HTML and MathML.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the markup flavour.
    pub fn with_output(mut self, output: MathOutput) -> Self {
        self.output = output;
        self
    }
}

impl Typesetter for KatexTypesetter {
    fn typeset(&self, latex: &str, kind: MathKind, macros: &MacroTable) -> Result<String> {
        let opts = katex::Opts::builder()
            .display_mode(kind.is_display())
            .output_type(OutputType::from(self.output))
            .throw_on_error(true)
            .macros(macros.definitions_map())
            .build()
            .map_err(|e| Error::InvalidOption(e.to_string()))?;

        Ok(katex::render_with_opts(latex, &opts)?)
    }

    fn name(&self) -> &str {
        "katex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_katex_inline() {
        let html = KatexTypesetter::new()
            .typeset("x^2", MathKind::Inline, MacroTable::builtin())
            .unwrap();
        assert!(html.contains("katex"));
        assert!(!html.contains("katex-display"));
    }

    #[test]
    fn test_katex_display() {
        let html = KatexTypesetter::new()
            .typeset(r"\sum_{i=1}^n i", MathKind::Display, MacroTable::builtin())
            .unwrap();
        assert!(html.contains("katex-display"));
    }

    #[test]
    fn test_katex_error_is_reported() {
        let result =
            KatexTypesetter::new().typeset(r"\frac{1", MathKind::Inline, MacroTable::builtin());
        assert!(matches!(result, Err(Error::Typeset(_))));
    }

    #[test]
    fn test_katex_uses_macro_definitions() {
        let mut macros = MacroTable::new();
        macros.add_definition(r"\half", r"\frac{1}{2}");
        let html = KatexTypesetter::new()
            .with_output(MathOutput::Mathml)
            .typeset(r"\half", MathKind::Inline, &macros)
            .unwrap();
        assert!(html.contains("mfrac"));
    }

    #[test]
    fn test_undefined_macro_fails_without_definition() {
        let result =
            KatexTypesetter::new().typeset(r"\half", MathKind::Inline, &MacroTable::new());
        assert!(result.is_err());
    }
}

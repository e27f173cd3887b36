//! # richtex
//!
//! LaTeX-aware rendering of rich question content to HTML.
//!
//! Stored content mixes literal HTML, LaTeX `center`/`tabular` environments
//! and math delimited by `\[...\]`, `\(...\)`, `$$...$$` or `$...$`. This
//! library turns it into HTML that can be injected into a page: environments
//! become `<div>`/`<table>` markup, newlines in running text become a
//! line-break marker, and math is typeset with KaTeX.
//!
//! ## Quick Start
//!
//! ```no_run
//! let html = richtex::render(r"The value is $\frac{\pi}{4}$ approx.");
//! assert!(html.contains(r#"data-latex="\frac{\pi}{4}""#));
//! ```
//!
//! ## Features
//!
//! - **Single pass**: content is tokenized once into typed spans and emitted linearly
//! - **Graceful degradation**: math that fails to typeset is left as written
//! - **Macro repair**: common misspelled control words are fixed before typesetting
//! - **Parallel batches**: many documents rendered at once with Rayon
//! - **Async file API**: behind the `async` feature

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

pub use error::{Error, Result};
pub use model::{
    Alignment, ColumnSpec, Delimiter, MathBlock, MathKind, Span, Table, TableCell, TableRow,
};
pub use parser::tokenize;
pub use render::{
    ContentRenderer, JsonFormat, KatexTypesetter, MacroTable, RenderOptions, RenderResult,
    RenderStats, Typesetter,
};

use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Render content to HTML with default options.
///
/// # Example
///
/// ```no_run
/// let html = richtex::render("Line one\nLine two");
/// assert!(html.contains("<br>"));
/// ```
pub fn render(text: &str) -> String {
    ContentRenderer::default().render(text)
}

/// Render content to HTML with custom options.
pub fn render_with_options(text: &str, options: &RenderOptions) -> String {
    ContentRenderer::new(options.clone()).render(text)
}

/// Render content and collect statistics.
pub fn render_with_stats(text: &str, options: &RenderOptions) -> RenderResult {
    ContentRenderer::new(options.clone().with_stats(true)).render_with_stats(text)
}

/// Render many documents in parallel, preserving input order.
pub fn render_batch<S: AsRef<str> + Sync>(texts: &[S], options: &RenderOptions) -> Vec<String> {
    let renderer = ContentRenderer::new(options.clone());
    texts
        .par_iter()
        .map(|text| renderer.render(text.as_ref()))
        .collect()
}

/// Read a UTF-8 file and render it to HTML.
///
/// # Example
///
/// ```no_run
/// let html = richtex::render_file("question.txt")?;
/// println!("{}", html);
/// # Ok::<(), richtex::Error>(())
/// ```
pub fn render_file<P: AsRef<Path>>(path: P) -> Result<String> {
    render_file_with_options(path, &RenderOptions::default())
}

/// Read a UTF-8 file and render it with custom options.
pub fn render_file_with_options<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let data = std::fs::read(path.as_ref())?;
    render_bytes_with_options(&data, options)
}

/// Render UTF-8 bytes to HTML.
pub fn render_bytes(data: &[u8]) -> Result<String> {
    render_bytes_with_options(data, &RenderOptions::default())
}

/// Render UTF-8 bytes with custom options.
pub fn render_bytes_with_options(data: &[u8], options: &RenderOptions) -> Result<String> {
    let text = std::str::from_utf8(data)?;
    Ok(render_with_options(text, options))
}

/// Read a file without blocking the runtime and render it.
#[cfg(feature = "async")]
pub async fn render_file_async<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let data = tokio::fs::read(path.as_ref()).await?;
    render_bytes_with_options(&data, options)
}

/// Builder API for rendering.
///
/// # Example
///
/// ```no_run
/// let html = richtex::Richtex::new()
///     .with_line_break("<br/>")
///     .with_macro(r"\half", r"\frac{1}{2}")
///     .render(r"$\half$");
/// ```
#[derive(Default)]
pub struct Richtex {
    options: RenderOptions,
    typesetter: Option<Arc<dyn Typesetter>>,
}

impl Richtex {
    /// Create a new Richtex builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line-break marker.
    pub fn with_line_break(mut self, marker: impl Into<String>) -> Self {
        self.options = self.options.with_line_break(marker);
        self
    }

    /// Add a macro definition.
    pub fn with_macro(mut self, name: impl Into<String>, definition: impl Into<String>) -> Self {
        self.options = self.options.with_macro(name, definition);
        self
    }

    /// Add a control-word repair.
    pub fn with_repair(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.options = self.options.with_repair(from, to);
        self
    }

    /// Enable Unicode NFC normalization.
    pub fn with_nfc(mut self) -> Self {
        self.options = self.options.with_unicode_normalization(true);
        self
    }

    /// Use a custom typesetting backend.
    pub fn with_typesetter<T: Typesetter + 'static>(mut self, typesetter: T) -> Self {
        self.typesetter = Some(Arc::new(typesetter));
        self
    }

    /// Build the renderer.
    pub fn build(self) -> ContentRenderer {
        let renderer = ContentRenderer::new(self.options);
        match self.typesetter {
            Some(typesetter) => renderer.with_shared_typesetter(typesetter),
            None => renderer,
        }
    }

    /// Render content to HTML.
    pub fn render(self, text: &str) -> String {
        self.build().render(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Typesetter for Plain {
        fn typeset(&self, latex: &str, _kind: MathKind, _macros: &MacroTable) -> Result<String> {
            Ok(latex.to_string())
        }

        fn name(&self) -> &str {
            "plain"
        }
    }

    #[test]
    fn test_builder_options() {
        let renderer = Richtex::new()
            .with_line_break("<br/>")
            .with_macro(r"\half", r"\frac12")
            .with_nfc()
            .with_typesetter(Plain)
            .build();

        assert_eq!(renderer.options().line_break, "<br/>");
        assert!(renderer.options().normalize_unicode);
        assert!(renderer.options().macros.definitions().contains_key(r"\half"));
        assert_eq!(renderer.render("a\nb"), "a<br/>b");
    }

    #[test]
    fn test_render_bytes_invalid_utf8() {
        let result = render_bytes(&[0x66, 0xFF, 0xFE]);
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_render_bytes_plain_text() {
        assert_eq!(render_bytes(b"no math here").unwrap(), "no math here");
    }

    #[test]
    fn test_render_file_missing() {
        let result = render_file("/nonexistent/question.txt");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_render_batch_preserves_order() {
        let inputs = ["a\nb", "c", "d\ne"];
        let options = RenderOptions::new().with_line_break("|");
        assert_eq!(render_batch(&inputs, &options), vec!["a|b", "c", "d|e"]);
    }

    #[test]
    fn test_render_with_stats_always_collects() {
        let result = render_with_stats("x\ny", &RenderOptions::default());
        assert_eq!(result.stats.line_breaks, 1);
    }
}

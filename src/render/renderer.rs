//! Single-pass HTML emitter over the token list.

use std::borrow::Cow;
use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;

use super::html::{self, CENTER_CLOSE, CENTER_OPEN};
use super::newline::{break_all_lines, expand_escaped_newlines, NewlineNormalizer};
use super::{KatexTypesetter, RenderOptions, RenderResult, RenderStats, Typesetter};
use crate::model::{MathBlock, MathKind, Span, Table};
use crate::parser::{tokenize, tokenize_math};

/// Renders rich content to HTML.
///
/// Holds no per-call state, so one renderer can serve many threads.
#[derive(Clone)]
pub struct ContentRenderer {
    options: RenderOptions,
    typesetter: Arc<dyn Typesetter>,
}

impl ContentRenderer {
    /// Create a renderer that typesets with KaTeX.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            typesetter: Arc::new(KatexTypesetter::new()),
        }
    }

    /// Use a different typesetting backend.
    pub fn with_typesetter<T: Typesetter + 'static>(mut self, typesetter: T) -> Self {
        self.typesetter = Arc::new(typesetter);
        self
    }

    /// Use a shared typesetting backend.
    pub fn with_shared_typesetter(mut self, typesetter: Arc<dyn Typesetter>) -> Self {
        self.typesetter = typesetter;
        self
    }

    /// Options in effect.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render content to HTML.
    pub fn render(&self, text: &str) -> String {
        self.render_with_stats(text).html
    }

    /// Render content to HTML, returning statistics alongside.
    pub fn render_with_stats(&self, text: &str) -> RenderResult {
        let source = self.prepare_source(text);
        let spans = self.tokenize_prepared(&source);

        let mut emitter = Emitter::new(self, source.len());
        for span in &spans {
            emitter.emit(&source, span);
        }
        emitter.finish()
    }

    /// Token list for `text` as the renderer sees it.
    ///
    /// Offsets refer to the prepared source: NFC applied when enabled and
    /// `\r\n` folded to `\n`.
    pub fn tokenize(&self, text: &str) -> Vec<Span> {
        self.tokenize_prepared(&self.prepare_source(text))
    }

    fn tokenize_prepared(&self, source: &str) -> Vec<Span> {
        if self.options.convert_environments {
            tokenize(source)
        } else {
            tokenize_math(source)
        }
    }

    fn prepare_source<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let text: Cow<'a, str> = if self.options.normalize_unicode {
            Cow::Owned(text.nfc().collect())
        } else {
            Cow::Borrowed(text)
        };

        if text.contains("\r\n") {
            Cow::Owned(text.replace("\r\n", "\n"))
        } else {
            text
        }
    }
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl std::fmt::Debug for ContentRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRenderer")
            .field("options", &self.options)
            .field("typesetter", &self.typesetter.name())
            .finish()
    }
}

/// Output buffer and running state for one render call.
struct Emitter<'r> {
    renderer: &'r ContentRenderer,
    out: String,
    normalizer: NewlineNormalizer,
    stats: RenderStats,
}

impl<'r> Emitter<'r> {
    fn new(renderer: &'r ContentRenderer, capacity: usize) -> Self {
        Self {
            renderer,
            out: String::with_capacity(capacity + capacity / 2),
            normalizer: NewlineNormalizer::new(),
            stats: RenderStats::default(),
        }
    }

    fn options(&self) -> &'r RenderOptions {
        &self.renderer.options
    }

    fn emit(&mut self, source: &str, span: &Span) {
        match span {
            Span::Text { .. } => {
                let marker = &self.options().line_break;
                self.normalizer.feed(span.slice(source), marker, &mut self.out);
            }
            Span::Math(block) => {
                // Math inside an open tag is attribute text, not content.
                if self.normalizer.in_tag() {
                    self.out.push_str(&block.source());
                } else {
                    self.emit_math(block);
                }
            }
            Span::Center { body, inner, .. } => self.emit_center(body, inner),
            Span::Table { table, .. } => self.emit_table(table),
        }
    }

    fn emit_math(&mut self, block: &MathBlock) {
        let markup = render_math_block(self.renderer, block, &mut self.stats);
        self.out.push_str(&markup);
    }

    fn emit_center(&mut self, body: &str, inner: &[Span]) {
        self.stats.centers += 1;
        self.out.push_str(CENTER_OPEN);
        for span in inner {
            match span {
                Span::Math(block) => self.emit_math(block),
                _ => {
                    let (text, breaks) =
                        break_all_lines(span.slice(body), &self.options().line_break);
                    self.stats.line_breaks += breaks as u32;
                    self.out.push_str(&text);
                }
            }
        }
        self.out.push_str(CENTER_CLOSE);
    }

    fn emit_table(&mut self, table: &Table) {
        self.stats.tables += 1;
        if table.fallback {
            self.stats.fallback_tables += 1;
        }

        let renderer = self.renderer;
        let stats = &mut self.stats;
        html::write_table(&mut self.out, table, |content| {
            render_cell(renderer, content, stats)
        });
    }

    fn finish(mut self) -> RenderResult {
        self.stats.line_breaks += self.normalizer.line_breaks() as u32;
        if !self.options().collect_stats {
            return RenderResult::html_only(self.out);
        }
        RenderResult::new(self.out, self.stats)
    }
}

/// Cell content keeps its newlines; only math inside it is typeset.
/// An escaped `\&` becomes `&amp;` in cell text and stays LaTeX inside math.
fn render_cell(renderer: &ContentRenderer, content: &str, stats: &mut RenderStats) -> String {
    let content = expand_escaped_newlines(content);
    let mut out = String::with_capacity(content.len());
    for span in tokenize_math(&content) {
        match &span {
            Span::Math(block) => out.push_str(&render_math_block(renderer, block, stats)),
            _ => out.push_str(&span.slice(&content).replace(r"\&", "&amp;")),
        }
    }
    out
}

fn render_math_block(
    renderer: &ContentRenderer,
    block: &MathBlock,
    stats: &mut RenderStats,
) -> String {
    let options = &renderer.options;
    if !options.render_math {
        return block.source();
    }

    let latex = options.macros.prepare(&block.body);
    match renderer.typesetter.typeset(&latex, block.kind, &options.macros) {
        Ok(markup) => {
            match block.kind {
                MathKind::Inline => stats.inline_math += 1,
                MathKind::Display => stats.display_math += 1,
            }
            let mut out = String::with_capacity(markup.len() + block.body.len() + 48);
            html::write_math_span(&mut out, block.kind, &block.body, &markup);
            out
        }
        Err(e) => {
            log::warn!(
                "{} could not typeset {} math block {}: {}",
                renderer.typesetter.name(),
                block.kind.as_str(),
                block.id,
                e
            );
            stats.failed_math += 1;
            block.source()
        }
    }
}

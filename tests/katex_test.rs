//! End-to-end rendering through KaTeX.

use richtex::render::{ContentRenderer, RenderOptions};

fn render(text: &str) -> richtex::RenderResult {
    richtex::render_with_stats(text, &RenderOptions::default())
}

#[test]
fn test_inline_fraction() {
    let result = render(r"The value is $\frac{\pi}{4}$ approx.");
    assert!(result.html.starts_with(r#"The value is <span class="math-inline" data-latex="\frac{\pi}{4}">"#));
    assert!(result.html.contains("katex"));
    assert!(result.html.ends_with("</span> approx."));
    assert_eq!(result.stats.inline_math, 1);
}

#[test]
fn test_display_math() {
    let result = render(r"$$\sum_{i=1}^{n} i$$");
    assert!(result.html.starts_with(r#"<span class="math-display""#));
    assert!(result.html.contains("katex-display"));
    assert_eq!(result.stats.display_math, 1);
}

#[test]
fn test_katex_error_keeps_source() {
    let result = render(r"bad \(\frac{1\) good $x$");
    assert!(result.html.starts_with(r"bad \(\frac{1\) good "));
    assert_eq!(result.stats.failed_math, 1);
    assert_eq!(result.stats.inline_math, 1);
}

#[test]
fn test_repaired_and_defined_macros_typeset() {
    let result = render(r"$\farc{1}{2}$ and $x \in \R$ and $\mathbbZ$");
    assert_eq!(result.stats.failed_math, 0);
    assert_eq!(result.stats.inline_math, 3);
}

#[test]
fn test_escaped_backslashes_typeset() {
    let result = render(r"$\\alpha + \\beta$");
    assert_eq!(result.stats.failed_math, 0);
    assert!(result.html.contains(r#"data-latex="\\alpha + \\beta""#));
}

#[test]
fn test_custom_macro() {
    let options = RenderOptions::new()
        .with_macro(r"\half", r"\frac{1}{2}")
        .with_stats(true);
    let result = ContentRenderer::new(options).render_with_stats(r"$\half$");
    assert_eq!(result.stats.failed_math, 0);
    assert!(result.html.contains("katex"));
}

#[test]
fn test_table_with_math_cells() {
    let html = richtex::render(r"\begin{tabular}{|c|c|}\hline $x^2$ & $y$ \\ \hline\end{tabular}");
    assert!(html.starts_with(r#"<table class="latex-table" border="1""#));
    assert_eq!(html.matches(r#"<span class="math-inline""#).count(), 2);
}

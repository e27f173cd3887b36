//! Block environment scanning (`center`, `tabular`).

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::read_brace_group;

/// Environment kinds converted to HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum EnvironmentKind {
    /// `\begin{center} ... \end{center}`
    Center {
        /// Body between the begin and end markers
        body: String,
    },
    /// `\begin{tabular}{spec} ... \end{tabular}`
    Tabular {
        /// Column specification (without braces)
        spec: String,
        /// Body between the column spec and the end marker
        body: String,
    },
}

/// A recognised environment and its byte range in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Offset of `\begin`
    pub start: usize,
    /// Offset just past the matching `\end{...}`
    pub end: usize,
    /// Environment content
    pub kind: EnvironmentKind,
}

fn begin_regex() -> &'static Regex {
    static BEGIN: OnceLock<Regex> = OnceLock::new();
    BEGIN.get_or_init(|| Regex::new(r"\\begin\{(center|tabular)\}").expect("begin pattern"))
}

/// Find all `center` and `tabular` environments, in source order.
///
/// Environments do not nest: the body of each runs to the first matching
/// `\end{name}`. A begin marker without an end marker (or a `tabular` without
/// a readable column spec) is left as plain text.
pub fn scan_environments(text: &str) -> Vec<Environment> {
    let mut environments = Vec::new();
    let mut cursor = 0;

    while let Some(caps) = begin_regex().captures_at(text, cursor) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let start = whole.start();
        let name = name.as_str();

        let parsed = match name {
            "tabular" => scan_tabular(text, whole.end()),
            _ => scan_center(text, whole.end()),
        };

        match parsed {
            Some((kind, end)) => {
                environments.push(Environment { start, end, kind });
                cursor = end;
            }
            None => {
                log::debug!("Unterminated {} environment at byte {}", name, start);
                cursor = whole.end();
            }
        }
    }

    environments
}

fn find_end(text: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let marker = format!("\\end{{{}}}", name);
    text[from..]
        .find(&marker)
        .map(|pos| (from + pos, from + pos + marker.len()))
}

fn scan_center(text: &str, body_start: usize) -> Option<(EnvironmentKind, usize)> {
    let (body_end, end) = find_end(text, body_start, "center")?;
    let body = text[body_start..body_end].to_string();
    Some((EnvironmentKind::Center { body }, end))
}

fn scan_tabular(text: &str, after_begin: usize) -> Option<(EnvironmentKind, usize)> {
    let mut pos = skip_whitespace(text, after_begin);

    // Optional vertical position argument: \begin{tabular}[t]{...}
    if text[pos..].starts_with('[') {
        let close = text[pos..].find(']')?;
        pos = skip_whitespace(text, pos + close + 1);
    }

    let (spec, body_start) = read_brace_group(text, pos)?;
    let (body_end, end) = find_end(text, body_start, "tabular")?;

    Some((
        EnvironmentKind::Tabular {
            spec: spec.to_string(),
            body: text[body_start..body_end].to_string(),
        },
        end,
    ))
}

fn skip_whitespace(text: &str, from: usize) -> usize {
    let trimmed = text[from..].trim_start();
    text.len() - trimmed.len()
}

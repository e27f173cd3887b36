//! Macro repair table applied to math bodies before typesetting.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Control-word repairs and fallback macro definitions.
///
/// `repairs` rename malformed control words in the LaTeX source before it is
/// typeset (`\farc` becomes `\frac`). `definitions` are handed to the
/// typesetter as macros, supplying commands its base vocabulary lacks.
/// Keys include the leading backslash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroTable {
    repairs: BTreeMap<String, String>,
    definitions: BTreeMap<String, String>,
}

const BUILTIN_REPAIRS: &[(&str, &str)] = &[
    (r"\farc", r"\frac"),
    (r"\frca", r"\frac"),
    (r"\fracc", r"\frac"),
    (r"\dfarc", r"\dfrac"),
    (r"\tfarc", r"\tfrac"),
    (r"\mathbbR", r"\mathbb{R}"),
    (r"\mathbbN", r"\mathbb{N}"),
    (r"\mathbbZ", r"\mathbb{Z}"),
    (r"\mathbbQ", r"\mathbb{Q}"),
    (r"\mathbbC", r"\mathbb{C}"),
    (r"\lamda", r"\lambda"),
    (r"\Lamda", r"\Lambda"),
    (r"\rightleftharpoon", r"\rightleftharpoons"),
];

const BUILTIN_DEFINITIONS: &[(&str, &str)] = &[
    (r"\R", r"\mathbb{R}"),
    (r"\N", r"\mathbb{N}"),
    (r"\Z", r"\mathbb{Z}"),
    (r"\Q", r"\mathbb{Q}"),
    (r"\C", r"\mathbb{C}"),
    (r"\xlongequal", r"\overset{#1}{=\!=\!=}"),
    (r"\longequal", r"=\!=\!="),
    (
        r"\longrightleftharpoons",
        r"\mathrel{\stackrel{\rightharpoonup}{\leftharpoondown}}",
    ),
    (r"\xrightleftarrows", r"\mathrel{\overset{#1}{\rightleftarrows}}"),
    (r"\ohm", r"\Omega"),
    (r"\celsius", r"^{\circ}\mathrm{C}"),
];

impl MacroTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table. Initialised once and shared read-only.
    pub fn builtin() -> &'static MacroTable {
        static BUILTIN: OnceLock<MacroTable> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let mut table = MacroTable::new();
            for (from, to) in BUILTIN_REPAIRS {
                table.add_repair(*from, *to);
            }
            for (name, definition) in BUILTIN_DEFINITIONS {
                table.add_definition(*name, *definition);
            }
            table
        })
    }

    /// Add or replace a control-word repair.
    pub fn add_repair(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.repairs.insert(from.into(), to.into());
    }

    /// Add or replace a macro definition.
    pub fn add_definition(&mut self, name: impl Into<String>, definition: impl Into<String>) {
        self.definitions.insert(name.into(), definition.into());
    }

    /// Parse a `NAME=DEFINITION` pair, as given on the command line.
    ///
    /// A missing leading backslash on the name is added.
    pub fn parse_definition(spec: &str) -> Result<(String, String)> {
        let (name, definition) = spec
            .split_once('=')
            .ok_or_else(|| Error::InvalidOption(format!("expected NAME=DEF, got '{}'", spec)))?;
        let name = name.trim();
        if name.trim_start_matches('\\').is_empty() {
            return Err(Error::InvalidOption(format!("empty macro name in '{}'", spec)));
        }
        let name = if name.starts_with('\\') {
            name.to_string()
        } else {
            format!("\\{}", name)
        };
        Ok((name, definition.to_string()))
    }

    /// Control-word repairs.
    pub fn repairs(&self) -> &BTreeMap<String, String> {
        &self.repairs
    }

    /// Macro definitions.
    pub fn definitions(&self) -> &BTreeMap<String, String> {
        &self.definitions
    }

    /// Macro definitions in the shape typesetting backends take.
    pub fn definitions_map(&self) -> HashMap<String, String> {
        self.definitions
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Merge another table into this one; entries in `other` win.
    pub fn extend(&mut self, other: &MacroTable) {
        self.repairs
            .extend(other.repairs.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.definitions
            .extend(other.definitions.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Unescape doubled backslashes, then apply repairs.
    pub fn prepare<'a>(&self, body: &'a str) -> Cow<'a, str> {
        match unescape_backslashes(body) {
            Cow::Borrowed(b) => self.repair(b),
            Cow::Owned(o) => Cow::Owned(self.repair(&o).into_owned()),
        }
    }

    /// Rename every control word that has a repair entry.
    ///
    /// Only whole control words match: `\farcs` is not touched by a
    /// `\farc` entry.
    pub fn repair<'a>(&self, latex: &'a str) -> Cow<'a, str> {
        if self.repairs.is_empty() || !latex.contains('\\') {
            return Cow::Borrowed(latex);
        }

        let bytes = latex.as_bytes();
        let mut output: Option<String> = None;
        let mut cursor = 0;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] != b'\\' {
                i += 1;
                continue;
            }
            let word_end = bytes[i + 1..]
                .iter()
                .position(|b| !b.is_ascii_alphabetic())
                .map_or(bytes.len(), |p| i + 1 + p);
            if word_end == i + 1 {
                // Control symbol such as `\\` or `\{`.
                i += 2;
                continue;
            }
            if let Some(replacement) = self.repairs.get(&latex[i..word_end]) {
                let out = output.get_or_insert_with(|| String::with_capacity(latex.len() + 8));
                out.push_str(&latex[cursor..i]);
                out.push_str(replacement);
                cursor = word_end;
            }
            i = word_end;
        }

        match output {
            Some(mut out) => {
                out.push_str(&latex[cursor..]);
                Cow::Owned(out)
            }
            None => Cow::Borrowed(latex),
        }
    }
}

/// Turn doubled backslashes (`\\`) into single ones.
pub fn unescape_backslashes(latex: &str) -> Cow<'_, str> {
    if latex.contains(r"\\") {
        Cow::Owned(latex.replace(r"\\", r"\"))
    } else {
        Cow::Borrowed(latex)
    }
}

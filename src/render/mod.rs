//! Rendering: macro preparation, typesetting, newline handling and HTML emission.

pub mod html;
mod json;
mod macros;
pub mod newline;
mod options;
mod renderer;
mod result;
mod typeset;

pub use json::{to_json, JsonFormat};
pub use macros::{unescape_backslashes, MacroTable};
pub use newline::{normalize_newlines, NewlineNormalizer, NewlineState, DEFAULT_LINE_BREAK};
pub use options::RenderOptions;
pub use renderer::ContentRenderer;
pub use result::{RenderResult, RenderStats};
pub use typeset::{KatexTypesetter, MathOutput, Typesetter};

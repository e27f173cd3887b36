//! Value types for content rendering.
//!
//! Everything here is transient: produced while scanning one input and
//! consumed by the emitter in the same call.

mod math;
mod span;
mod table;

pub use math::{Delimiter, MathBlock, MathKind};
pub use span::Span;
pub use table::{Alignment, ColumnSpec, Table, TableCell, TableRow};

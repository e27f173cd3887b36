//! Table types produced from `tabular` environments.

use serde::{Deserialize, Serialize};

/// A table parsed from a `tabular` environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Column specification from `\begin{tabular}{...}`
    pub column_spec: ColumnSpec,

    /// Rows in source order
    pub rows: Vec<TableRow>,

    /// Whether the simple (border-less) parse path produced the rows
    pub fallback: bool,
}

impl Table {
    /// Create a new empty table.
    pub fn new(column_spec: ColumnSpec) -> Self {
        Self {
            column_spec,
            rows: Vec::new(),
            fallback: false,
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (widest row, counting spans).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.span_width()).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether cell borders are drawn.
    pub fn is_bordered(&self) -> bool {
        self.column_spec.bordered
    }

    /// Check if the table has merged cells.
    pub fn has_merged_cells(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|r| &r.cells)
            .any(|c| c.is_merged())
    }
}

/// Column specification of a `tabular` environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Spec text as written, e.g. `|c|c|`
    pub raw: String,

    /// Whether column separators (`|`) are present
    pub bordered: bool,
}

impl ColumnSpec {
    /// Parse a column specification.
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            bordered: raw.contains('|'),
        }
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Rule drawn above the row
    pub has_top_border: bool,

    /// Rule drawn below the row
    pub has_bottom_border: bool,
}

impl TableRow {
    /// Create a new row with cells and no borders.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            has_top_border: false,
            has_bottom_border: false,
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Set both borders and return self.
    pub fn with_borders(mut self, top: bool, bottom: bool) -> Self {
        self.has_top_border = top;
        self.has_bottom_border = bottom;
        self
    }

    /// Number of columns covered, counting spans.
    pub fn span_width(&self) -> usize {
        self.cells.iter().map(|c| c.colspan as usize).sum()
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Raw cell content (may contain HTML and math)
    pub content: String,

    /// Number of columns this cell spans
    pub colspan: u16,

    /// Cell alignment
    pub alignment: Alignment,
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            colspan: 1,
            alignment: Alignment::Default,
        }
    }

    /// Set colspan and return self.
    pub fn colspan(mut self, span: u16) -> Self {
        self.colspan = span.max(1);
        self
    }

    /// Set alignment and return self.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Check if this cell spans multiple columns.
    pub fn is_merged(&self) -> bool {
        self.colspan > 1
    }
}

/// Horizontal alignment for table cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Inherit from the table
    #[default]
    Default,
    /// Left aligned
    Left,
    /// Centered
    Center,
    /// Right aligned
    Right,
}

impl Alignment {
    /// Alignment from a `\multicolumn` alignment argument such as `|c|` or `p{2cm}`.
    pub fn from_spec(spec: &str) -> Self {
        match spec.chars().find(|c| c.is_ascii_alphabetic()) {
            Some('l') => Alignment::Left,
            Some('c') => Alignment::Center,
            Some('r') => Alignment::Right,
            _ => Alignment::Default,
        }
    }

    /// CSS `text-align` value, or `None` when the table's own alignment applies.
    pub fn css(&self) -> Option<&'static str> {
        match self {
            Alignment::Left => Some("left"),
            Alignment::Right => Some("right"),
            Alignment::Default | Alignment::Center => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new(ColumnSpec::parse("cc"));
        assert!(table.is_empty());
        assert!(!table.is_bordered());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_table_with_data() {
        let mut table = Table::new(ColumnSpec::parse("|c|c|"));
        table.add_row(TableRow::from_strings(["Name", "Age"]));
        table.add_row(TableRow::from_strings(["Alice", "30"]));

        assert!(table.is_bordered());
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_merged_cells() {
        let mut table = Table::new(ColumnSpec::default());
        table.add_row(TableRow::new(vec![TableCell::text("Merged").colspan(2)]));

        assert!(table.has_merged_cells());
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_zero_colspan_clamped() {
        assert_eq!(TableCell::text("x").colspan(0).colspan, 1);
    }

    #[test]
    fn test_alignment_from_spec() {
        assert_eq!(Alignment::from_spec("c"), Alignment::Center);
        assert_eq!(Alignment::from_spec("|l|"), Alignment::Left);
        assert_eq!(Alignment::from_spec("r|"), Alignment::Right);
        assert_eq!(Alignment::from_spec("|"), Alignment::Default);
        assert_eq!(Alignment::Right.css(), Some("right"));
        assert_eq!(Alignment::Center.css(), None);
    }
}

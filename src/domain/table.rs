// ============================================================
// Layer 3 - Table
// ============================================================
// A small in-memory table: named columns over rows of cells.
// The loader fills it with text cells straight from the file,
// the cleaner filters rows and appends derived columns.
//
// Rows have no identity beyond their position; the table is
// moved from stage to stage, never shared.

use std::fmt;

use crate::domain::error::PipelineError;

/// One value in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Empty field or a recognised NA marker
    Missing,
    Text(String),
    Integer(i64),
    Tokens(Vec<String>),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Cell::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_tokens(&self) -> Option<&[String]> {
        match self {
            Cell::Tokens(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing    => Ok(()),
            Cell::Text(s)    => f.write_str(s),
            Cell::Integer(n) => write!(f, "{n}"),
            Cell::Tokens(t)  => f.write_str(&t.join(" ")),
        }
    }
}

pub type Row = Vec<Cell>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows:    Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Build a table from literal rows. Every row must have one
    /// cell per column.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like `column_index` but a missing column is an error
    pub fn require_column(&self, name: &str) -> Result<usize, PipelineError> {
        self.column_index(name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
    }

    pub fn push_row(&mut self, row: Row) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row width does not match table width"
        );
        self.rows.push(row);
    }

    /// Iterate over the cells of one column, in row order
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().map(move |row| &row[index])
    }

    /// Keep only the rows for which `keep` returns true.
    /// Order of the surviving rows is preserved.
    /// Returns the number of rows removed.
    pub fn retain_rows<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Row) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|row| keep(row));
        before - self.rows.len()
    }

    /// Set a column to `values`, appending it if the name is new
    /// and overwriting it in place otherwise.
    pub fn set_column(&mut self, name: &str, values: Vec<Cell>) {
        assert_eq!(
            values.len(),
            self.rows.len(),
            "column '{name}' length does not match row count"
        );

        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["Text".into(), "Score".into()],
            vec![
                vec![Cell::Text("a".into()), Cell::Integer(5)],
                vec![Cell::Missing,          Cell::Integer(1)],
                vec![Cell::Text("c".into()), Cell::Missing],
            ],
        )
    }

    #[test]
    fn test_retain_keeps_order() {
        let mut t = sample();
        let removed = t.retain_rows(|row| !row[0].is_missing());
        assert_eq!(removed, 1);
        let texts: Vec<_> = t.column(0).filter_map(Cell::as_text).collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[test]
    fn test_set_column_appends_then_overwrites() {
        let mut t = sample();
        t.set_column("Flag", vec![Cell::Integer(1), Cell::Integer(2), Cell::Integer(3)]);
        assert_eq!(t.columns().len(), 3);
        t.set_column("Flag", vec![Cell::Missing, Cell::Missing, Cell::Missing]);
        assert_eq!(t.columns().len(), 3);
        assert!(t.column(2).all(Cell::is_missing));
    }

    #[test]
    fn test_require_column() {
        let t = sample();
        assert_eq!(t.require_column("Score"), Ok(1));
        assert_eq!(
            t.require_column("Summary"),
            Err(PipelineError::MissingColumn("Summary".into()))
        );
    }
}

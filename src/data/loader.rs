// ============================================================
// Layer 4 - CSV Loader
// ============================================================
// Reads a comma-separated file with a header row into a Table.
// Column names are taken from the header exactly as written.
//
// Every field is loaded as text; empty fields and the usual
// NA markers ("NA", "N/A", "null", "NaN", ...) become Missing
// so the cleaner can drop them.
//
// The file is opened, read to the end and closed inside
// `load`; nothing is kept open between stages.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::domain::table::{Cell, Table};
use crate::domain::traits::TableSource;

/// Field values read as missing
const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan",
    "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a",
    "nan", "null",
];

pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for CsvLoader {
    fn load(&self) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .with_context(|| format!("Cannot open '{}'", self.path.display()))?;

        let columns: Vec<String> = reader
            .headers()
            .with_context(|| format!("Cannot read header of '{}'", self.path.display()))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut table = Table::new(columns);

        for (line, record) in reader.records().enumerate() {
            // +2: one for the header, one for 1-based numbering
            let record = record.with_context(|| {
                format!("Malformed record {} in '{}'", line + 2, self.path.display())
            })?;
            table.push_row(record.iter().map(to_cell).collect());
        }

        tracing::info!(
            "Loaded {} rows x {} columns from '{}'",
            table.len(),
            table.columns().len(),
            self.path.display()
        );
        Ok(table)
    }
}

fn to_cell(field: &str) -> Cell {
    if NA_MARKERS.contains(&field) {
        Cell::Missing
    } else {
        Cell::Text(field.to_string())
    }
}

// ============================================================
// Layer 4 - CSV Writer
// ============================================================
// Writes one side of the split as `Text,Sentiment` rows.
//
// Rows go to a temporary file next to the destination (stage),
// which is then renamed over it (commit). A failed or abandoned
// write leaves the destination as it was, never a half file.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::domain::review::LabeledText;
use crate::domain::traits::{LabeledSink, StagedWrite};

const HEADER: [&str; 2] = ["Text", "Sentiment"];

pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LabeledSink for CsvWriter {
    fn stage(&self, rows: &[LabeledText]) -> Result<Box<dyn StagedWrite + '_>> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Cannot create temporary file in '{}'", dir.display()))?;

        {
            // the header is written by hand so an empty split still gets one
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file_mut());

            wtr.write_record(HEADER)?;
            for row in rows {
                wtr.serialize(row)
                    .with_context(|| format!("Cannot write row to '{}'", self.path.display()))?;
            }
            wtr.flush()
                .with_context(|| format!("Cannot flush '{}'", self.path.display()))?;
        }

        tmp.as_file().sync_all()?;
        tracing::debug!("Staged {} rows for '{}'", rows.len(), self.path.display());

        Ok(Box::new(StagedCsv { tmp, path: &self.path }))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A fully written temporary file waiting to be renamed into place.
/// Dropping it deletes the temporary file.
struct StagedCsv<'a> {
    tmp:  NamedTempFile,
    path: &'a Path,
}

impl StagedWrite for StagedCsv<'_> {
    fn commit(self: Box<Self>) -> Result<()> {
        let StagedCsv { tmp, path } = *self;
        tmp.persist(path)
            .with_context(|| format!("Cannot move output into '{}'", path.display()))?;
        tracing::debug!("Committed '{}'", path.display());
        Ok(())
    }
}

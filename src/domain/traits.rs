// ============================================================
// Layer 3 - Core Traits
// ============================================================
// The seams between the driver and the outside world:
// where rows come from, where labelled rows go, and who
// hears about progress. The application layer only sees
// these traits, so tests can swap in in-memory versions.

use anyhow::Result;

use crate::domain::review::LabeledText;
use crate::domain::table::Table;

// ─── TableSource ──────────────────────────────────────────────────────────────
/// Anything that can produce the raw input table.
///
/// Implementations:
///   - CsvLoader → reads a comma-separated file with a header row
pub trait TableSource {
    /// Load every row. Columns match the source header exactly.
    fn load(&self) -> Result<Table>;
}

// ─── LabeledSink ──────────────────────────────────────────────────────────────
/// Anything that can persist one side of the split.
///
/// Writing happens in two phases: `stage` puts the rows somewhere
/// invisible, `commit` makes them the new content of the
/// destination. A dropped, uncommitted stage leaves the
/// destination as it was.
///
/// Implementations:
///   - CsvWriter → writes `Text,Sentiment` rows to a file
pub trait LabeledSink {
    /// Prepare all rows in the given order without touching the destination
    fn stage(&self, rows: &[LabeledText]) -> Result<Box<dyn StagedWrite + '_>>;

    /// Human readable destination, used in status messages
    fn describe(&self) -> String;

    /// Stage and commit in one go
    fn write_all(&self, rows: &[LabeledText]) -> Result<()> {
        self.stage(rows)?.commit()
    }
}

/// Rows that have been staged by a LabeledSink
pub trait StagedWrite {
    /// Replace the destination's content with the staged rows
    fn commit(self: Box<Self>) -> Result<()>;
}

// ─── ProgressReporter ─────────────────────────────────────────────────────────
/// Receives one status line per stage boundary.
pub trait ProgressReporter {
    fn report(&self, message: &str);
}


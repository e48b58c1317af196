// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// The stages a run goes through, in order:
//
//   Reviews.csv
//       │
//       ▼
//   CsvLoader         → Table with the file's own columns
//       │
//       ▼
//   Cleaner           → filters rows, adds Sentiment / Tokens /
//       │               Processed_Text (text steps in normalizer)
//       ▼
//   split_labeled     → stratified, seeded train/test partition
//       │
//       ▼
//   CsvWriter         → train_data.csv, test_data.csv
//
// Each stage consumes the whole output of the previous one.

/// Reads the input CSV into a Table
pub mod loader;

/// Per-text transformations: lowercase → tokens → lemmas
pub mod normalizer;

/// Row filters and derived columns over the whole Table
pub mod cleaner;

/// Stratified train/test split
pub mod splitter;

/// Writes `Text,Sentiment` files atomically
pub mod writer;

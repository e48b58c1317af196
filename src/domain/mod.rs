// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain types and traits with no file access:
//
//   table.rs   - the row/column structure every stage passes on
//   review.rs  - Sentiment, LabeledText and Split
//   traits.rs  - TableSource, LabeledSink, ProgressReporter
//   error.rs   - faults callers can match on

pub mod error;

pub mod review;

pub mod table;

pub mod traits;

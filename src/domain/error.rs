// ============================================================
// Layer 3 - Pipeline Errors
// ============================================================
// Faults that a caller may want to tell apart from plain I/O
// failures. Everything else travels as anyhow::Error with
// context attached at the boundary where it happened.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// The input header lacks a column the cleaner needs
    #[error("Required column '{0}' not found in input header")]
    MissingColumn(String),

    /// A sentiment class is too small to appear on both sides of the split
    #[error(
        "Cannot stratify: class '{class}' has only {count} member(s), \
         at least 2 are required"
    )]
    StratificationInfeasible { class: String, count: usize },

    /// One side of the split would not fit every class
    #[error(
        "Split of {total} rows gives {train} train / {test} test rows, \
         fewer than the {classes} classes present"
    )]
    SplitTooSmall {
        total:   usize,
        train:   usize,
        test:    usize,
        classes: usize,
    },

    #[error("test_size must be strictly between 0 and 1, got {0}")]
    InvalidTestSize(f64),

    /// A lexical resource parsed to nothing
    #[error("NLP resource '{0}' is empty")]
    EmptyResource(String),
}

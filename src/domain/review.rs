// ============================================================
// Layer 3 - Review Domain Types
// ============================================================
// The binary sentiment label derived from a 1-5 star score,
// and the (text, label) pair that the splitter and writer
// work on once the table has been normalised.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores equal to this are neutral and excluded from the task
pub const NEUTRAL_SCORE: i64 = 3;

/// Binary sentiment label.
/// Serialises as the lowercase strings used in the output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    /// Map a non-neutral score to its label: positive iff score > 3.
    ///
    /// Returns None for the neutral score so callers cannot
    /// accidentally label a row that should have been dropped.
    pub fn from_score(score: i64) -> Option<Self> {
        match score {
            NEUTRAL_SCORE => None,
            s if s > NEUTRAL_SCORE => Some(Sentiment::Positive),
            _ => Some(Sentiment::Negative),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }

    /// Parse the lowercase label back, as stored in a table cell
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "positive" => Some(Sentiment::Positive),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the split output: the processed text and its label.
/// Field names match the output CSV header `Text,Sentiment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledText {
    #[serde(rename = "Text")]
    pub text: String,

    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
}

impl LabeledText {
    pub fn new(text: impl Into<String>, sentiment: Sentiment) -> Self {
        Self { text: text.into(), sentiment }
    }
}

/// Disjoint train/test partition of the normalised rows
#[derive(Debug, Clone, Default)]
pub struct Split {
    pub train: Vec<LabeledText>,
    pub test:  Vec<LabeledText>,
}

impl Split {
    pub fn total(&self) -> usize {
        self.train.len() + self.test.len()
    }
}

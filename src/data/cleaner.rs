// ============================================================
// Layer 4 - Table Cleaner
// ============================================================
// Takes the raw table from the loader and returns it ready
// for splitting. Steps run in a fixed order because each one
// relies on what the previous steps guarantee:
//
//   1. drop rows with a missing Text or Score
//   2. drop rows whose Text was already seen (first one wins)
//   3. coerce Score to an integer, dropping rows that fail
//   4. drop neutral rows (Score == 3)
//   5. add Sentiment from Score
//   6-11. normalise Text and add Tokens and Processed_Text
//
// Rows whose tokens all turn out to be stop words are kept
// with an empty Processed_Text.

use anyhow::Result;
use std::collections::HashSet;

use crate::data::normalizer::Normalizer;
use crate::domain::error::PipelineError;
use crate::domain::review::{LabeledText, Sentiment};
use crate::domain::table::{Cell, Table};

pub const TEXT_COLUMN: &str = "Text";
pub const SCORE_COLUMN: &str = "Score";
pub const SENTIMENT_COLUMN: &str = "Sentiment";
pub const TOKENS_COLUMN: &str = "Tokens";
pub const PROCESSED_TEXT_COLUMN: &str = "Processed_Text";

/// How many rows each filter removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningReport {
    pub input_rows:       usize,
    pub missing:          usize,
    pub duplicates:       usize,
    pub malformed_scores: usize,
    pub neutral:          usize,
    pub kept:             usize,
}

pub struct Cleaner<'r> {
    normalizer: Normalizer<'r>,
}

impl<'r> Cleaner<'r> {
    pub fn new(normalizer: Normalizer<'r>) -> Self {
        Self { normalizer }
    }

    /// Run every cleaning step over `table`
    pub fn clean(&self, mut table: Table) -> Result<(Table, CleaningReport)> {
        let text_idx  = table.require_column(TEXT_COLUMN)?;
        let score_idx = table.require_column(SCORE_COLUMN)?;

        let mut report = CleaningReport {
            input_rows: table.len(),
            ..Default::default()
        };

        // ── Step 1: Missing values ────────────────────────────────────────────
        report.missing = table.retain_rows(|row| {
            !row[text_idx].is_missing() && !row[score_idx].is_missing()
        });

        // ── Step 2: Duplicate texts ───────────────────────────────────────────
        let mut seen: HashSet<String> = HashSet::new();
        report.duplicates = table.retain_rows(|row| {
            let text = row[text_idx].to_string();
            seen.insert(text)
        });

        // ── Step 3: Integer scores ────────────────────────────────────────────
        let mut malformed = 0usize;
        for row in table.rows_mut() {
            row[score_idx] = match coerce_score(&row[score_idx]) {
                Some(score) => Cell::Integer(score),
                None => {
                    tracing::warn!(
                        "Dropping row with non-integer score '{}'",
                        row[score_idx]
                    );
                    malformed += 1;
                    Cell::Missing
                }
            };
        }
        table.retain_rows(|row| !row[score_idx].is_missing());
        report.malformed_scores = malformed;

        // ── Step 4: Neutral reviews ───────────────────────────────────────────
        report.neutral = table.retain_rows(|row| {
            row[score_idx].as_integer().and_then(Sentiment::from_score).is_some()
        });

        // ── Step 5: Sentiment label ───────────────────────────────────────────
        let sentiments: Vec<Cell> = table
            .column(score_idx)
            .map(|cell| {
                cell.as_integer()
                    .and_then(Sentiment::from_score)
                    .map_or(Cell::Missing, |s| Cell::Text(s.as_str().to_string()))
            })
            .collect();
        table.set_column(SENTIMENT_COLUMN, sentiments);

        // ── Steps 6-11: Text normalisation ────────────────────────────────────
        let mut texts     = Vec::with_capacity(table.len());
        let mut tokens    = Vec::with_capacity(table.len());
        let mut processed = Vec::with_capacity(table.len());

        for cell in table.column(text_idx) {
            let normalized = self.normalizer.normalize(&cell.to_string());
            texts.push(Cell::Text(normalized.text));
            tokens.push(Cell::Tokens(normalized.tokens));
            processed.push(Cell::Text(normalized.processed));
        }

        table.set_column(TEXT_COLUMN, texts);
        table.set_column(TOKENS_COLUMN, tokens);
        table.set_column(PROCESSED_TEXT_COLUMN, processed);

        report.kept = table.len();
        tracing::debug!(?report, "Cleaning finished");

        Ok((table, report))
    }
}

/// Parse a score cell. Accepts integers and integral decimals
/// such as "4.0"; anything else is rejected.
pub fn coerce_score(cell: &Cell) -> Option<i64> {
    match cell {
        Cell::Integer(n) => Some(*n),
        Cell::Text(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                return Some(n);
            }
            let f = s.parse::<f64>().ok()?;
            let integral = f.is_finite()
                && f.fract() == 0.0
                && f >= i64::MIN as f64
                && f <= i64::MAX as f64;
            integral.then_some(f as i64)
        }
        Cell::Missing | Cell::Tokens(_) => None,
    }
}

/// Pull the (Processed_Text, Sentiment) pairs out of a cleaned table
pub fn labeled_rows(table: &Table) -> Result<Vec<LabeledText>> {
    let text_idx      = table.require_column(PROCESSED_TEXT_COLUMN)?;
    let sentiment_idx = table.require_column(SENTIMENT_COLUMN)?;

    let rows = table
        .rows()
        .iter()
        .map(|row| {
            let sentiment = row[sentiment_idx]
                .as_text()
                .and_then(Sentiment::parse)
                .ok_or_else(|| PipelineError::MissingColumn(SENTIMENT_COLUMN.to_string()))?;
            Ok(LabeledText::new(row[text_idx].to_string(), sentiment))
        })
        .collect::<Result<Vec<_>, PipelineError>>()?;

    Ok(rows)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::lexicon::fixtures;

    fn raw_table(rows: &[(Option<&str>, Option<&str>)]) -> Table {
        Table::from_rows(
            vec!["Id".into(), TEXT_COLUMN.into(), SCORE_COLUMN.into()],
            rows.iter()
                .enumerate()
                .map(|(i, (text, score))| {
                    let cell = |v: &Option<&str>| v.map_or(Cell::Missing, |s| Cell::Text(s.into()));
                    vec![Cell::Text(i.to_string()), cell(text), cell(score)]
                })
                .collect(),
        )
    }

    fn clean(table: Table) -> (Table, CleaningReport) {
        let cleaner = Cleaner::new(Normalizer::new(fixtures::resources()));
        cleaner.clean(table).unwrap()
    }

    fn column(table: &Table, name: &str) -> Vec<String> {
        let idx = table.column_index(name).unwrap();
        table.column(idx).map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_output_columns() {
        let (t, _) = clean(raw_table(&[(Some("Good dog food"), Some("5"))]));
        assert_eq!(
            t.columns(),
            &["Id", "Text", "Score", "Sentiment", "Tokens", "Processed_Text"]
        );
    }

    #[test]
    fn test_amazing_example() {
        let (t, _) = clean(raw_table(&[(Some("This is AMAZING! Best ever."), Some("5"))]));
        assert_eq!(column(&t, SENTIMENT_COLUMN), vec!["positive"]);
        assert_eq!(column(&t, TEXT_COLUMN), vec!["this is amazing best ever"]);
        assert_eq!(column(&t, PROCESSED_TEXT_COLUMN), vec!["amazing best ever"]);
        let tokens = t.rows()[0][4].as_tokens().unwrap();
        assert!(!tokens.iter().any(|w| w == "this" || w == "is"));
    }

    #[test]
    fn test_neutral_rows_removed_and_labels_follow_score() {
        let (t, report) = clean(raw_table(&[
            (Some("one"),   Some("1")),
            (Some("two"),   Some("2")),
            (Some("three"), Some("3")),
            (Some("four"),  Some("4")),
            (Some("five"),  Some("5")),
        ]));
        assert_eq!(report.neutral, 1);

        let score_idx = t.column_index(SCORE_COLUMN).unwrap();
        let sent_idx  = t.column_index(SENTIMENT_COLUMN).unwrap();
        for row in t.rows() {
            let score = row[score_idx].as_integer().unwrap();
            assert_ne!(score, 3);
            assert_eq!(row[sent_idx].as_text() == Some("positive"), score > 3);
        }
    }

    #[test]
    fn test_duplicates_keep_first_seen() {
        let (t, report) = clean(raw_table(&[
            (Some("Same words"), Some("5")),
            (Some("Other"),      Some("1")),
            (Some("Same words"), Some("1")),
        ]));
        assert_eq!(report.duplicates, 1);
        assert_eq!(column(&t, "Id"), vec!["0", "1"]);
        assert_eq!(column(&t, SENTIMENT_COLUMN), vec!["positive", "negative"]);
    }

    #[test]
    fn test_duplicates_compare_raw_text() {
        // differ only in case before normalisation, so both survive
        let (t, _) = clean(raw_table(&[(Some("Tasty"), Some("5")), (Some("tasty"), Some("4"))]));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_missing_values_dropped() {
        let (t, report) = clean(raw_table(&[
            (None,          Some("5")),
            (Some("fine"),  None),
            (Some("kept"),  Some("1")),
        ]));
        assert_eq!(report.missing, 2);
        assert_eq!(column(&t, "Id"), vec!["2"]);
    }

    #[test]
    fn test_missing_removed_before_dedup() {
        // the first "x" has no score, so the second one is the first valid
        let (t, _) = clean(raw_table(&[(Some("x"), None), (Some("x"), Some("1"))]));
        assert_eq!(column(&t, "Id"), vec!["1"]);
    }

    #[test]
    fn test_malformed_scores_dropped() {
        let (t, report) = clean(raw_table(&[
            (Some("a"), Some("4.0")),
            (Some("b"), Some("4.5")),
            (Some("c"), Some("great")),
            (Some("d"), Some(" 2 ")),
        ]));
        assert_eq!(report.malformed_scores, 2);
        assert_eq!(column(&t, "Id"), vec!["0", "3"]);
        assert_eq!(column(&t, SCORE_COLUMN), vec!["4", "2"]);
    }

    #[test]
    fn test_empty_processed_text_retained() {
        let (t, _) = clean(raw_table(&[(Some("It is what it is."), Some("5"))]));
        assert_eq!(t.len(), 1);
        assert_eq!(column(&t, PROCESSED_TEXT_COLUMN), vec![""]);
    }

    #[test]
    fn test_missing_required_column() {
        let table = Table::from_rows(vec!["Body".into(), SCORE_COLUMN.into()], vec![]);
        let cleaner = Cleaner::new(Normalizer::new(fixtures::resources()));
        let err = cleaner.clean(table).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PipelineError>(),
            Some(&PipelineError::MissingColumn("Text".into()))
        );
    }

    #[test]
    fn test_cleaning_is_idempotent_on_processed_text() {
        let (first, _) = clean(raw_table(&[
            (Some("Great-value snacks, my DOGS love them!"), Some("5")),
            (Some("Terrible taste... the boxes arrived crushed"), Some("1")),
        ]));
        let once = column(&first, PROCESSED_TEXT_COLUMN);

        // feed the normalised text back in as a fresh table
        let replay: Vec<(Option<&str>, Option<&str>)> = once
            .iter()
            .map(|t| (Some(t.as_str()), Some("5")))
            .collect();
        let (second, _) = clean(raw_table(&replay));
        assert_eq!(column(&second, PROCESSED_TEXT_COLUMN), once);
    }

    #[test]
    fn test_labeled_rows() {
        let (t, _) = clean(raw_table(&[(Some("Bad cups"), Some("1")), (Some("Nice"), Some("5"))]));
        let rows = labeled_rows(&t).unwrap();
        assert_eq!(
            rows,
            vec![
                LabeledText::new("bad cup", Sentiment::Negative),
                LabeledText::new("nice", Sentiment::Positive),
            ]
        );
    }

    #[test]
    fn test_coerce_score() {
        assert_eq!(coerce_score(&Cell::Text("5".into())), Some(5));
        assert_eq!(coerce_score(&Cell::Text("5.0".into())), Some(5));
        assert_eq!(coerce_score(&Cell::Text("N/A".into())), None);
        assert_eq!(coerce_score(&Cell::Text("inf".into())), None);
        assert_eq!(coerce_score(&Cell::Integer(2)), Some(2));
        assert_eq!(coerce_score(&Cell::Missing), None);
    }
}

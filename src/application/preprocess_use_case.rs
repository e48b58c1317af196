// ============================================================
// Layer 2 - PreprocessUseCase
// ============================================================
// Runs one preprocessing job end to end:
//
//   Setup:  make sure the data directory exists
//           stop if the input file is missing
//           load stop words and the WordNet noun lexicon
//   Step 1: Load the CSV                 (Layer 4 - data)
//   Step 2: Clean and normalise          (Layer 4 - data)
//   Step 3: Stratified train/test split  (Layer 4 - data)
//   Step 4: Write both files             (Layer 4 - data)
//
// Both sides of the split are staged to temporary files before
// either output is replaced. Status lines go to the ProgressReporter; the caller
// decides where they end up.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::data::{
    cleaner::{labeled_rows, Cleaner, CleaningReport},
    loader::CsvLoader,
    normalizer::Normalizer,
    splitter::split_labeled,
    writer::CsvWriter,
};
use crate::domain::error::PipelineError;
use crate::domain::traits::{LabeledSink, ProgressReporter, TableSource};
use crate::infra::lexicon::NlpResources;

// ─── Preprocessing Configuration ──────────────────────────────────────────────
// File names are relative to `data_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    pub data_dir:    PathBuf,
    pub input_file:  String,
    pub train_file:  String,
    pub test_file:   String,
    pub test_size:   f64,
    pub seed:        u64,

    /// WordNet dictionary directory; `<data_dir>/wordnet` when unset
    pub wordnet_dir: Option<PathBuf>,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            data_dir:    PathBuf::from("data"),
            input_file:  "Reviews.csv".to_string(),
            train_file:  "train_data.csv".to_string(),
            test_file:   "test_data.csv".to_string(),
            test_size:   0.2,
            seed:        42,
            wordnet_dir: None,
        }
    }
}

impl PreprocessConfig {
    pub fn input_path(&self) -> PathBuf {
        self.data_dir.join(&self.input_file)
    }

    pub fn train_path(&self) -> PathBuf {
        self.data_dir.join(&self.train_file)
    }

    pub fn test_path(&self) -> PathBuf {
        self.data_dir.join(&self.test_file)
    }

    pub fn wordnet_path(&self) -> PathBuf {
        self.wordnet_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("wordnet"))
    }
}

/// What a completed run did
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub cleaning:    CleaningReport,
    pub train_rows:  usize,
    pub test_rows:   usize,
    pub train_path:  String,
    pub test_path:   String,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed(RunSummary),

    /// The input file was not there; nothing was written
    MissingInput(PathBuf),
}

// ─── PreprocessUseCase ────────────────────────────────────────────────────────
pub struct PreprocessUseCase<R: ProgressReporter> {
    config:   PreprocessConfig,
    reporter: R,
}

impl<R: ProgressReporter> PreprocessUseCase<R> {
    pub fn new(config: PreprocessConfig, reporter: R) -> Self {
        Self { config, reporter }
    }

    /// Check the environment, then run every stage
    pub fn execute(&self) -> Result<RunOutcome> {
        let cfg = &self.config;

        if !(cfg.test_size > 0.0 && cfg.test_size < 1.0) {
            return Err(PipelineError::InvalidTestSize(cfg.test_size).into());
        }

        // ── Setup: data directory and input file ──────────────────────────────
        if !cfg.data_dir.exists() {
            fs::create_dir_all(&cfg.data_dir).with_context(|| {
                format!("Cannot create data directory '{}'", cfg.data_dir.display())
            })?;
            self.reporter
                .report(&format!("Created data directory at {}", cfg.data_dir.display()));
        }

        let input = cfg.input_path();
        if !input.is_file() {
            tracing::warn!("Input file '{}' is missing, stopping", input.display());
            self.reporter
                .report(&format!("Input file not found at {}", input.display()));
            self.reporter.report(&format!(
                "Please ensure the dataset is downloaded and placed in the '{}/' directory.",
                cfg.data_dir.display()
            ));
            return Ok(RunOutcome::MissingInput(input));
        }

        // ── Setup: NLP resources, loaded once for the whole run ───────────────
        let resources = NlpResources::load(&cfg.wordnet_path())?;

        let summary = self.run_stages(
            &CsvLoader::new(input),
            &CsvWriter::new(cfg.train_path()),
            &CsvWriter::new(cfg.test_path()),
            &resources,
        )?;

        tracing::info!(
            "Run finished: {} rows in, {} kept, {} train / {} test",
            summary.cleaning.input_rows,
            summary.cleaning.kept,
            summary.train_rows,
            summary.test_rows,
        );

        Ok(RunOutcome::Completed(summary))
    }

    /// Load → clean → split → write, against any source and sinks
    pub fn run_stages(
        &self,
        source:     &dyn TableSource,
        train_sink: &dyn LabeledSink,
        test_sink:  &dyn LabeledSink,
        resources:  &NlpResources,
    ) -> Result<RunSummary> {
        let cfg = &self.config;

        // ── Step 1: Load ──────────────────────────────────────────────────────
        self.reporter.report("Loading data...");
        let table = source.load()?;

        // ── Step 2: Clean and normalise ───────────────────────────────────────
        self.reporter.report("Preprocessing data...");
        let cleaner = Cleaner::new(Normalizer::new(resources));
        let (table, cleaning) = cleaner.clean(table)?;
        tracing::info!(
            "Cleaning kept {} of {} rows ({} missing, {} duplicate, {} bad score, {} neutral)",
            cleaning.kept,
            cleaning.input_rows,
            cleaning.missing,
            cleaning.duplicates,
            cleaning.malformed_scores,
            cleaning.neutral,
        );

        // ── Step 3: Split ─────────────────────────────────────────────────────
        self.reporter
            .report("Splitting data into training and testing sets...");
        let rows  = labeled_rows(&table)?;
        let split = split_labeled(rows, cfg.test_size, cfg.seed)?;

        // ── Step 4: Write ─────────────────────────────────────────────────────
        // stage both sides first so a failed write replaces neither output
        let train_staged = train_sink.stage(&split.train)?;
        let test_staged  = test_sink.stage(&split.test)?;
        train_staged.commit()?;
        test_staged.commit()?;

        let train_path = train_sink.describe();
        let test_path  = test_sink.describe();
        self.reporter
            .report(&format!("Training data saved to {train_path}"));
        self.reporter
            .report(&format!("Testing data saved to {test_path}"));
        self.reporter
            .report("Data preprocessing completed successfully.");

        Ok(RunSummary {
            cleaning,
            train_rows: split.train.len(),
            test_rows:  split.test.len(),
            train_path,
            test_path,
        })
    }
}

// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses arguments, runs the use case and prints its status
// lines to stdout. Logging goes through tracing instead.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::PreprocessArgs;

use crate::application::preprocess_use_case::{PreprocessConfig, PreprocessUseCase, RunOutcome};
use crate::domain::traits::ProgressReporter;

#[derive(Parser, Debug)]
#[command(
    name = "review-prep",
    version,
    about = "Clean a review CSV, label sentiment and write stratified train/test splits."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: PreprocessArgs,
}

/// Prints each status line on its own line
pub struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn report(&self, message: &str) {
        println!("{message}");
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config: PreprocessConfig = self.args.into();
        tracing::debug!(?config, "Starting preprocessing");

        match PreprocessUseCase::new(config, ConsoleReporter).execute()? {
            RunOutcome::Completed(summary) => {
                tracing::debug!(?summary, "Preprocessing done");
            }
            // already reported; not a failure of the process
            RunOutcome::MissingInput(path) => {
                tracing::debug!("No input at '{}'", path.display());
            }
        }
        Ok(())
    }
}

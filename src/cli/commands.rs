// ============================================================
// Layer 1 - CLI Arguments
// ============================================================
// Only file locations are configurable. Every flag defaults to
// the fixed layout of the job, so a bare `review-prep` processes
// data/Reviews.csv into data/train_data.csv and
// data/test_data.csv. The 0.2 test share and seed 42 are fixed.

use clap::Args;
use std::path::PathBuf;

use crate::application::preprocess_use_case::PreprocessConfig;

/// All arguments for a preprocessing run
#[derive(Args, Debug)]
pub struct PreprocessArgs {
    /// Directory holding the input and receiving both outputs
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Input CSV file name inside the data directory
    #[arg(long, default_value = "Reviews.csv")]
    pub input: String,

    /// Training split file name inside the data directory
    #[arg(long, default_value = "train_data.csv")]
    pub train_output: String,

    /// Test split file name inside the data directory
    #[arg(long, default_value = "test_data.csv")]
    pub test_output: String,

    /// WordNet dict/ directory (index.noun, noun.exc), `<data-dir>/wordnet` when unset
    #[arg(long)]
    pub wordnet_dir: Option<PathBuf>,
}

/// The application layer never sees clap types
impl From<PreprocessArgs> for PreprocessConfig {
    fn from(a: PreprocessArgs) -> Self {
        PreprocessConfig {
            data_dir:    a.data_dir,
            input_file:  a.input,
            train_file:  a.train_output,
            test_file:   a.test_output,
            wordnet_dir: a.wordnet_dir,
            ..PreprocessConfig::default()
        }
    }
}

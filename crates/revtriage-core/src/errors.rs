use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TriageError>;

/// Error taxonomy for the labeling pipeline. Every variant is fatal to the
/// invoking command; there is no retry or partial-success path.
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("No dataset file found. Ensure there is one CSV or Parquet file in {}.", .dir.display())]
    NoDatasetFound { dir: PathBuf },

    #[error(
        "Multiple dataset files found ({}). Only one CSV or Parquet file should be present in {}.",
        .found.join(", "),
        .dir.display()
    )]
    MultipleDatasetsFound { dir: PathBuf, found: Vec<String> },

    #[error("Model {0} not supported.")]
    UnsupportedModel(String),

    #[error("Prompt columns should contain exactly 2 columns, got {0}.")]
    InvalidColumnSelection(usize),

    #[error("No data found in the dataset.")]
    EmptyDataset,

    #[error("Predictions file for {model} not found at {}.", .path.display())]
    PredictionsNotFound { model: String, path: PathBuf },

    #[error("No dataset found at {}.", .path.display())]
    DatasetMissing { path: PathBuf },

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

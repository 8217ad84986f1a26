//! Dataset I/O: single-file discovery under the input directory, Parquet
//! persistence for labeled outputs, and the idempotent cleanup that lets a
//! re-run start from a clean slate.
//!
//! The filesystem layout is part of the pipeline contract, not
//! configuration: exactly one CSV/Parquet file under `data/input/`,
//! per-model outputs at `data/labeled_data_<model>.parquet`, merged and
//! consensus outputs under `data/output/`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::errors::{Result, TriageError};

pub const DATA_DIR: &str = "data";
pub const INPUT_DIR: &str = "data/input";
pub const OUTPUT_DIR: &str = "data/output";
pub const LABELED_DATASET: &str = "data/output/labeled_dataset.parquet";
pub const COMBINED_DATASET: &str = "data/output/combined_dataset.parquet";

/// Path of the per-model prediction file.
pub fn labeled_data_path(model_name: &str, data_dir: &Path) -> PathBuf {
    data_dir.join(format!("labeled_data_{model_name}.parquet"))
}

fn labeled_csv_path(model_name: &str, data_dir: &Path) -> PathBuf {
    data_dir.join(format!("labeled_data_{model_name}.csv"))
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Reads the single dataset file from `input_dir`. Refuses to guess when
/// more than one CSV/Parquet candidate is present.
pub fn read_dataset(input_dir: &Path) -> Result<DataFrame> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if matches!(extension_of(&path), Some("csv") | Some("parquet")) {
            candidates.push(path);
        }
    }
    candidates.sort();

    if candidates.len() > 1 {
        return Err(TriageError::MultipleDatasetsFound {
            dir: input_dir.to_path_buf(),
            found: candidates
                .iter()
                .map(|p| {
                    p.file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default()
                })
                .collect(),
        });
    }
    let Some(path) = candidates.pop() else {
        return Err(TriageError::NoDatasetFound {
            dir: input_dir.to_path_buf(),
        });
    };

    println!("Reading data from {} ...", path.display());
    let df = read_table(&path)?;
    println!("Data loaded successfully, number of rows: {}", df.height());
    Ok(df)
}

fn read_table(path: &Path) -> Result<DataFrame> {
    let df = if extension_of(path) == Some("csv") {
        CsvReadOptions::default()
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?
    } else {
        ParquetReader::new(fs::File::open(path)?).finish()?
    };
    Ok(df)
}

pub fn read_parquet(path: &Path) -> Result<DataFrame> {
    Ok(ParquetReader::new(fs::File::open(path)?).finish()?)
}

/// Writes `df` as Parquet, creating parent directories and overwriting any
/// existing file at `path`.
pub fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    ParquetWriter::new(file).finish(df)?;
    Ok(())
}

/// Persists the labeled dataframe to the per-model output file.
pub fn save_labeled(df: &mut DataFrame, model_name: &str, data_dir: &Path) -> Result<PathBuf> {
    println!("Saving labeled data ...");
    let path = labeled_data_path(model_name, data_dir);
    write_parquet(df, &path)?;
    println!("Saved {} labeled examples to {}", df.height(), path.display());
    Ok(path)
}

/// Removes the outputs a prior run for `model_name` would have produced.
/// Missing files are the expected steady state, not an error; any other
/// filesystem failure propagates. The `.csv` sibling is removed for parity
/// with historical runs even though this pipeline only writes Parquet.
pub fn clean_up(model_name: &str, data_dir: &Path) -> Result<()> {
    for path in [
        labeled_data_path(model_name, data_dir),
        labeled_csv_path(model_name, data_dir),
    ] {
        match fs::remove_file(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed stale output"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Reads the prediction file a `label` run produced for `model_name`.
pub fn read_model_predictions(model_name: &str, data_dir: &Path) -> Result<DataFrame> {
    let path = labeled_data_path(model_name, data_dir);
    if !path.exists() {
        return Err(TriageError::PredictionsNotFound {
            model: model_name.to_string(),
            path,
        });
    }
    read_parquet(&path)
}

/// True when `dir` holds at least one Parquet file. A missing directory
/// counts as "no merged output yet".
pub fn parquet_exists(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    entries
        .flatten()
        .any(|entry| extension_of(&entry.path()) == Some("parquet"))
}

/// Occurrence counts for the values of a string column, most frequent
/// first.
pub fn value_counts(df: &DataFrame, column: &str) -> Result<Vec<(String, usize)>> {
    let series = df.column(column)?;
    let ca = series.str()?;
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in ca.into_iter().flatten() {
        *counts.entry(value).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, n)| (value.to_string(), n))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(out)
}

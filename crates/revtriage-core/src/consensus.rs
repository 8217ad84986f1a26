//! Multi-model consensus: collapse the per-model label columns of a merged
//! dataset into one `quality_label` column via logical OR over "bad".
//!
//! Label columns are discovered from row 0 alone: a column qualifies iff
//! its first value is exactly `"good"` or `"bad"`. The convention is
//! fragile by design history (an unrelated column whose first cell happens
//! to hold one of those strings would qualify too) and is kept for
//! compatibility; all of it sits behind [`find_label_columns`] so a future
//! schema can replace the sentinel without touching the reduction.

use std::path::Path;

use polars::prelude::*;

use crate::dataset::read_parquet;
use crate::errors::{Result, TriageError};
use crate::models::{BAD_LABEL, GOOD_LABEL};

/// Name of the derived consensus column.
pub const QUALITY_LABEL: &str = "quality_label";

pub fn load_labeled_data(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(TriageError::DatasetMissing {
            path: path.to_path_buf(),
        });
    }
    read_parquet(path)
}

/// Discovery phase: the columns whose row-0 value is a label. Exact,
/// case-sensitive string comparison; later rows are never consulted.
pub fn find_label_columns(df: &DataFrame) -> Result<Vec<String>> {
    if df.height() == 0 {
        return Err(TriageError::EmptyDataset);
    }

    let mut columns = Vec::new();
    for name in df.get_column_names() {
        let series = df.column(name)?;
        if series.dtype() != &DataType::String {
            continue;
        }
        if let Some(first) = series.str()?.get(0) {
            if first == GOOD_LABEL || first == BAD_LABEL {
                columns.push(name.to_string());
            }
        }
    }
    Ok(columns)
}

/// Reduction phase: one consensus value per row ("bad" wins over any
/// column), appended as [`QUALITY_LABEL`] while the discovered label
/// columns are dropped. Other columns keep their relative order.
pub fn combine_labels(df: &DataFrame) -> Result<DataFrame> {
    let label_columns = find_label_columns(df)?;

    let mut any_bad = vec![false; df.height()];
    for name in &label_columns {
        let ca = df.column(name)?.str()?;
        for (row, value) in ca.into_iter().enumerate() {
            if value == Some(BAD_LABEL) {
                any_bad[row] = true;
            }
        }
    }
    let consensus: Vec<&str> = any_bad
        .iter()
        .map(|bad| if *bad { BAD_LABEL } else { GOOD_LABEL })
        .collect();

    let mut out = df.clone();
    out.with_column(Series::new(QUALITY_LABEL, consensus))?;
    for name in &label_columns {
        out = out.drop(name)?;
    }
    Ok(out)
}

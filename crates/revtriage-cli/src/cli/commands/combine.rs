use std::path::Path;

use revtriage_core::consensus::{combine_labels, load_labeled_data};
use revtriage_core::dataset::{write_parquet, COMBINED_DATASET, LABELED_DATASET};

use crate::exit_codes::SUCCESS;

pub async fn run() -> anyhow::Result<i32> {
    let dataset = load_labeled_data(Path::new(LABELED_DATASET))?;
    let mut combined = combine_labels(&dataset)?;
    write_parquet(&mut combined, Path::new(COMBINED_DATASET))?;
    println!("Done.");
    Ok(SUCCESS)
}

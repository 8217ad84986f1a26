use std::path::Path;

use revtriage_core::dataset::{self, DATA_DIR, INPUT_DIR, LABELED_DATASET, OUTPUT_DIR};
use revtriage_core::labeler::LabelingContract;

use crate::cli::args::MergeArgs;
use crate::exit_codes::SUCCESS;

/// Folds one model's predictions into `data/output/labeled_dataset.parquet`.
/// An existing merged file is extended by one column; only when none exists
/// is the raw input dataset used as the base.
pub async fn run(args: MergeArgs) -> anyhow::Result<i32> {
    let mut df = if dataset::parquet_exists(Path::new(OUTPUT_DIR)) {
        dataset::read_parquet(Path::new(LABELED_DATASET))?
    } else {
        dataset::read_dataset(Path::new(INPUT_DIR))?
    };

    let predictions = dataset::read_model_predictions(&args.model_name, Path::new(DATA_DIR))?;
    let contract = LabelingContract::for_model(&args.model_name);
    let column = predictions.column(&contract.output_column)?.clone();
    df.with_column(column)?;
    tracing::debug!(columns = ?df.get_column_names(), "columns after merge");

    dataset::write_parquet(&mut df, Path::new(LABELED_DATASET))?;
    dataset::clean_up(&args.model_name, Path::new(DATA_DIR))?;

    println!("Predictions have been added to the dataset.");
    println!("Merged dataset saved at ./{LABELED_DATASET}");
    Ok(SUCCESS)
}

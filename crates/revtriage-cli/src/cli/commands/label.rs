use std::path::Path;
use std::sync::Arc;

use revtriage_core::dataset::{self, DATA_DIR, INPUT_DIR};
use revtriage_core::labeler::{Labeler, LabelingContract};
use revtriage_core::models::{model_settings, GenerationParams, DEFAULT_SEED};
use revtriage_core::providers::llm::VllmClient;

use crate::cli::args::LabelArgs;
use crate::exit_codes::SUCCESS;

pub async fn run(args: LabelArgs) -> anyhow::Result<i32> {
    dataset::clean_up(&args.model_name, Path::new(DATA_DIR))?;

    // An unsupported model name must fail before any dataset I/O.
    let settings = model_settings(&args.model_name, DEFAULT_SEED)?;

    let mut df = dataset::read_dataset(Path::new(INPUT_DIR))?;

    println!("Loading model {} ...", args.model_name);
    let client = Arc::new(VllmClient::new(&settings));
    let labeler = Labeler::new(client, GenerationParams::greedy(settings.seed));
    let contract = LabelingContract::for_model(&args.model_name);

    labeler.label_dataset(&mut df, &contract).await?;
    dataset::save_labeled(&mut df, &args.model_name, Path::new(DATA_DIR))?;

    let counts = dataset::value_counts(&df, &contract.output_column)?;
    let formatted: Vec<String> = counts
        .iter()
        .map(|(label, n)| format!("{label}={n}"))
        .collect();
    println!("Value counts: {}", formatted.join(", "));

    Ok(SUCCESS)
}

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "revtriage",
    version,
    about = "Batch-label text-revision datasets with locally served LLMs and merge the per-model verdicts into one consensus quality label"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Label the input dataset with one model's good/bad predictions
    Label(LabelArgs),
    /// Fold one model's predictions into the merged labeled dataset
    Merge(MergeArgs),
    /// Collapse per-model label columns into a single consensus column
    Combine,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LabelArgs {
    /// The model name. It is required to run the experiment and to save the data.
    #[arg(long = "model_name", short = 'm')]
    pub model_name: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct MergeArgs {
    /// The model whose predictions get added to the merged dataset.
    #[arg(long = "model_name", short = 'm')]
    pub model_name: String,
}

//! Labeling service: builds the prompts for a dataset, runs one blocking
//! pass over the batch against the configured client, and attaches the
//! per-model prediction column. No retries, no timeouts, no partial
//! results; a failed call aborts the run and the next run's cleanup starts
//! it from scratch.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;

use crate::errors::Result;
use crate::models::{GenerationParams, ANSWER_CHOICES};
use crate::prompt::{build_prompts, CLASSIFY_PROMPT, DEFAULT_PROMPT_COLUMNS, SYSTEM_PROMPT};
use crate::providers::llm::LlmClient;

/// Names the columns one labeling run reads and writes, so the
/// `<model>_prediction` convention lives in exactly one place.
#[derive(Debug, Clone)]
pub struct LabelingContract {
    pub prompt_columns: [String; 2],
    pub output_column: String,
}

impl LabelingContract {
    pub fn for_model(model_name: &str) -> Self {
        Self {
            prompt_columns: [
                DEFAULT_PROMPT_COLUMNS[0].to_string(),
                DEFAULT_PROMPT_COLUMNS[1].to_string(),
            ],
            output_column: format!("{model_name}_prediction"),
        }
    }

    pub fn with_prompt_columns(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
        self.prompt_columns = [before.into(), after.into()];
        self
    }
}

pub struct Labeler {
    client: Arc<dyn LlmClient>,
    params: GenerationParams,
}

impl Labeler {
    pub fn new(client: Arc<dyn LlmClient>, params: GenerationParams) -> Self {
        Self { client, params }
    }

    /// Labels every prompt in order. Returns exactly one label per prompt;
    /// the first failed call aborts the whole pass.
    pub async fn generate_labels(&self, prompts: &[String]) -> Result<Vec<String>> {
        let progress = progress_bar(prompts.len());
        let mut labels = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            let response = self
                .client
                .complete(prompt, Some(SYSTEM_PROMPT), &self.params, &ANSWER_CHOICES)
                .await?;
            labels.push(response.text);
            if let Some(bar) = &progress {
                bar.inc(1);
            }
        }
        if let Some(bar) = &progress {
            bar.finish_and_clear();
        }
        Ok(labels)
    }

    /// Builds prompts from the contract's columns, generates labels, and
    /// attaches them as the contract's output column.
    pub async fn label_dataset(
        &self,
        df: &mut DataFrame,
        contract: &LabelingContract,
    ) -> Result<()> {
        let columns = [
            contract.prompt_columns[0].as_str(),
            contract.prompt_columns[1].as_str(),
        ];
        let prompts = build_prompts(df, &columns, CLASSIFY_PROMPT)?;

        println!("Generating predictions for {} examples ...", prompts.len());
        let labels = self.generate_labels(&prompts).await?;
        tracing::debug!(
            predictions = labels.len(),
            rows = df.height(),
            provider = self.client.provider_name(),
            "attaching prediction column"
        );

        df.with_column(Series::new(contract.output_column.as_str(), labels))?;
        Ok(())
    }
}

/// Progress display during generation, opt-in via `USE_TQDM=True`.
/// Display failures never affect the run; indicatif hides itself on
/// non-terminal outputs.
fn progress_bar(len: usize) -> Option<ProgressBar> {
    if std::env::var("USE_TQDM").as_deref() != Ok("True") {
        return None;
    }
    let bar = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    Some(bar)
}

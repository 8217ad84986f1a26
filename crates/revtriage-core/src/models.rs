//! Static per-model configuration. Each supported model maps to an
//! immutable settings record, validated at lookup time; unknown identifiers
//! fail with a typed error before any generation is attempted.

use serde::Serialize;

use crate::errors::{Result, TriageError};

/// Label vocabulary the classifier is constrained to.
pub const GOOD_LABEL: &str = "good";
pub const BAD_LABEL: &str = "bad";
pub const ANSWER_CHOICES: [&str; 2] = [GOOD_LABEL, BAD_LABEL];

/// Seed used for every labeling run unless overridden.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptFormat {
    Llama2,
    Llama3,
    Gemma,
}

impl PromptFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptFormat::Llama2 => "llama2",
            PromptFormat::Llama3 => "llama3",
            PromptFormat::Gemma => "gemma",
        }
    }
}

/// Settings for one locally served model.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelSettings {
    pub name: &'static str,
    pub model_path: &'static str,
    pub prompt_format: PromptFormat,
    pub seed: u64,
    pub quant: Option<&'static str>,
    pub max_logprobs: u32,
    pub num_gpus: u32,
    pub max_model_len: Option<u32>,
}

/// Looks up the settings record for `model_name`.
pub fn model_settings(model_name: &str, seed: u64) -> Result<ModelSettings> {
    let base = ModelSettings {
        name: "",
        model_path: "",
        prompt_format: PromptFormat::Llama2,
        seed,
        quant: None,
        max_logprobs: 4,
        num_gpus: 1,
        max_model_len: None,
    };

    let settings = match model_name {
        "mistral" => ModelSettings {
            name: "mistral",
            model_path: "../models/mistral-7b-instruct-v02",
            prompt_format: PromptFormat::Llama2,
            ..base
        },
        "llama-3.1" => ModelSettings {
            name: "llama-3.1",
            model_path: "../models/llama3_1-8b-instruct",
            prompt_format: PromptFormat::Llama3,
            ..base
        },
        "gemma" => ModelSettings {
            name: "gemma-2",
            model_path: "../models/gemma-2-9b-it",
            prompt_format: PromptFormat::Gemma,
            ..base
        },
        "gemma-27" => ModelSettings {
            name: "gemma-2-27b",
            model_path: "../models/gemma-2-27b-it",
            prompt_format: PromptFormat::Gemma,
            ..base
        },
        "nemo" => ModelSettings {
            name: "mistral-nemo",
            model_path: "../models/mistral-nemo-instruct-12b",
            prompt_format: PromptFormat::Llama2,
            // shorter context so the 12B fits on a single 80GB A100
            max_model_len: Some(8_192),
            ..base
        },
        _ => return Err(TriageError::UnsupportedModel(model_name.to_string())),
    };

    Ok(settings)
}

/// Generation controls passed to the inference endpoint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub seed: u64,
    pub max_tokens: u32,
}

impl GenerationParams {
    /// Greedy decoding with a fixed seed and a short output cap; the
    /// answers are single labels.
    pub fn greedy(seed: u64) -> Self {
        Self {
            temperature: 0.0,
            seed,
            max_tokens: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_model() {
        let settings = model_settings("mistral", DEFAULT_SEED).unwrap();
        assert_eq!(settings.name, "mistral");
        assert_eq!(settings.model_path, "../models/mistral-7b-instruct-v02");
        assert_eq!(settings.prompt_format, PromptFormat::Llama2);
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.max_model_len, None);
    }

    #[test]
    fn nemo_caps_context_length() {
        let settings = model_settings("nemo", DEFAULT_SEED).unwrap();
        assert_eq!(settings.max_model_len, Some(8_192));
        assert_eq!(settings.prompt_format, PromptFormat::Llama2);
    }

    #[test]
    fn gemma_27_resolves_to_larger_checkpoint() {
        let settings = model_settings("gemma-27", DEFAULT_SEED).unwrap();
        assert_eq!(settings.name, "gemma-2-27b");
        assert_eq!(settings.model_path, "../models/gemma-2-27b-it");
    }

    #[test]
    fn unknown_model_is_rejected() {
        let err = model_settings("gpt-neo", DEFAULT_SEED).unwrap_err();
        assert!(matches!(err, TriageError::UnsupportedModel(name) if name == "gpt-neo"));
    }

    #[test]
    fn greedy_params_are_deterministic() {
        let params = GenerationParams::greedy(7);
        assert_eq!(params.temperature, 0.0);
        assert_eq!(params.seed, 7);
    }
}

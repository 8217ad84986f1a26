use async_trait::async_trait;
use serde_json::json;

use super::{LlmClient, LlmResponse};
use crate::models::{GenerationParams, ModelSettings};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/v1";

/// Client for a locally served model behind an OpenAI-compatible
/// chat-completions endpoint (vLLM serve). The answer vocabulary is passed
/// as a `guided_choice` constraint so the server only emits allowed labels.
pub struct VllmClient {
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl VllmClient {
    /// Endpoint from `VLLM_BASE_URL`, falling back to the local default.
    pub fn new(settings: &ModelSettings) -> Self {
        let base_url =
            std::env::var("VLLM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(settings, base_url)
    }

    pub fn with_base_url(settings: &ModelSettings, base_url: impl Into<String>) -> Self {
        Self {
            model: settings.model_path.to_string(),
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LlmClient for VllmClient {
    async fn complete(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        params: &GenerationParams,
        choices: &[&str],
    ) -> anyhow::Result<LlmResponse> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let mut messages = Vec::new();
        if let Some(system) = system_prompt {
            messages.push(json!({"role": "system", "content": system}));
        }
        messages.push(json!({"role": "user", "content": prompt}));

        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": params.temperature,
            "seed": params.seed,
            "max_tokens": params.max_tokens,
            "guided_choice": choices,
        });

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!("chat completions error (status {status}): {error_text}");
        }

        let json: serde_json::Value = resp.json().await?;
        let text = json
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("chat completions response missing content"))?
            .trim()
            .to_string();

        if !choices.contains(&text.as_str()) {
            anyhow::bail!("model answered {text:?}, expected one of {choices:?}");
        }

        Ok(LlmResponse {
            text,
            provider: self.provider_name().to_string(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "vllm"
    }
}

use std::sync::Mutex;

use async_trait::async_trait;

use super::{LlmClient, LlmResponse};
use crate::models::{GenerationParams, GOOD_LABEL};

/// Scripted client for tests: answers are consumed front-to-back, then the
/// fallback label repeats.
#[derive(Debug)]
pub struct FakeClient {
    model: String,
    responses: Mutex<Vec<String>>,
    fallback: String,
}

impl FakeClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            responses: Mutex::new(Vec::new()),
            fallback: GOOD_LABEL.to_string(),
        }
    }

    pub fn with_responses(self, responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses),
            ..self
        }
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(
        &self,
        _prompt: &str,
        _system_prompt: Option<&str>,
        _params: &GenerationParams,
        _choices: &[&str],
    ) -> anyhow::Result<LlmResponse> {
        let mut responses = self
            .responses
            .lock()
            .map_err(|_| anyhow::anyhow!("fake client response queue poisoned"))?;
        let text = if responses.is_empty() {
            self.fallback.clone()
        } else {
            responses.remove(0)
        };

        Ok(LlmResponse {
            text,
            provider: self.provider_name().to_string(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

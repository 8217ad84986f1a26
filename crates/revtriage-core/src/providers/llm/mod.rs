//! The inference boundary. Everything behind [`LlmClient`] is an external
//! collaborator: prompts go in, one constrained answer string comes out.

use async_trait::async_trait;

use crate::models::GenerationParams;

pub mod fake;
pub mod vllm;

pub use fake::FakeClient;
pub use vllm::VllmClient;

#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
}

/// One classification call against a served model. Implementations must
/// return a `text` drawn from `choices`.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        params: &GenerationParams,
        choices: &[&str],
    ) -> anyhow::Result<LlmResponse>;

    fn provider_name(&self) -> &'static str;
}

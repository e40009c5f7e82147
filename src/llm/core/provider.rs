//! Provider trait for LLM implementations

use async_trait::async_trait;

use super::{
    error::LlmError,
    types::{GenerateRequest, GenerateResponse},
};

/// Main interface that all LLM provider implementations must satisfy
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a complete response
    ///
    /// Sends the request to the provider and waits for the whole answer.
    /// No retries are attempted; any failure is returned to the caller.
    ///
    /// # Arguments
    /// * `request` - The generation request with messages, system prompt and config
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError>;

    /// Model identifier sent with each request
    fn model_id(&self) -> &str;
}

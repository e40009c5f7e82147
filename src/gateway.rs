//! Completion gateway
//!
//! Turns one piece of user text into one reply, using a fixed system prompt
//! and whichever [`LlmProvider`] the service was started with.

use std::sync::Arc;

use tracing::debug;

use crate::llm::{GenerateRequest, GenerationConfig, LlmError, LlmProvider};

/// System prompt used when none is configured
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Stateless reply generator shared by all requests
#[derive(Clone)]
pub struct CompletionGateway {
    provider: Arc<dyn LlmProvider>,
    system_prompt: String,
    config: GenerationConfig,
}

impl CompletionGateway {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            config: GenerationConfig::default(),
        }
    }

    /// Replace the system instruction sent ahead of every user text
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Replace the generation parameters
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    /// Ask the provider for a reply to `user_text`
    ///
    /// Makes exactly one outbound call. Failures are returned unchanged.
    pub async fn get_reply(&self, user_text: &str) -> Result<String, LlmError> {
        let request = GenerateRequest::single_turn(Some(self.system_prompt.clone()), user_text)
            .with_config(self.config.clone());

        let response = self.provider.generate(request).await?;

        debug!(
            model = self.provider.model_id(),
            finish_reason = ?response.finish_reason,
            total_tokens = response.usage.map(|u| u.total_tokens),
            "reply generated"
        );

        Ok(response.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{GenerateResponse, MessageRole};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records requests and echoes the user text back
    #[derive(Default)]
    struct EchoProvider {
        requests: Mutex<Vec<GenerateRequest>>,
    }

    #[async_trait]
    impl LlmProvider for EchoProvider {
        async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
            let text = format!("echo: {}", request.messages[0].content);
            self.requests.lock().unwrap().push(request);
            Ok(GenerateResponse {
                text,
                finish_reason: None,
                usage: None,
            })
        }

        fn model_id(&self) -> &str {
            "echo"
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl LlmProvider for FailingProvider {
        async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
            Err(LlmError::HttpError {
                status: 500,
                body: "boom".to_string(),
            })
        }

        fn model_id(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_sends_system_prompt_and_user_text() {
        let provider = Arc::new(EchoProvider::default());
        let gateway = CompletionGateway::new(provider.clone());

        let reply = gateway.get_reply("Hello").await.unwrap();
        assert_eq!(reply, "echo: Hello");

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system.as_deref(), Some(DEFAULT_SYSTEM_PROMPT));
        assert_eq!(requests[0].messages.len(), 1);
        assert_eq!(requests[0].messages[0].role, MessageRole::User);
        assert_eq!(requests[0].messages[0].content, "Hello");
    }

    #[tokio::test]
    async fn test_custom_prompt_and_config() {
        let provider = Arc::new(EchoProvider::default());
        let gateway = CompletionGateway::new(provider.clone())
            .with_system_prompt("Answer in French.")
            .with_config(GenerationConfig::new(50));

        gateway.get_reply("Hi").await.unwrap();

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].system.as_deref(), Some("Answer in French."));
        assert_eq!(requests[0].config.max_tokens, Some(50));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let gateway = CompletionGateway::new(Arc::new(FailingProvider));
        let err = gateway.get_reply("Hello").await.unwrap_err();
        assert!(matches!(err, LlmError::HttpError { status: 500, .. }));
    }
}

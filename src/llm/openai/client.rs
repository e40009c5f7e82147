//! OpenAI client implementation

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use crate::llm::core::{
    error::LlmError,
    provider::LlmProvider,
    types::{GenerateRequest, GenerateResponse},
};

use super::mapper::{error_from_status, from_openai_response, to_openai_request};
use super::types::ChatCompletionResponse;

/// Public OpenAI API root
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat model identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OpenAiModel {
    /// gpt-3.5-turbo
    #[default]
    Gpt35Turbo,
    /// gpt-4o-mini
    Gpt4oMini,
    /// gpt-4o
    Gpt4o,
    /// Any other identifier, passed through as-is
    Custom(String),
}

impl OpenAiModel {
    /// Get the model identifier string sent to the API
    pub fn as_str(&self) -> &str {
        match self {
            OpenAiModel::Gpt35Turbo => "gpt-3.5-turbo",
            OpenAiModel::Gpt4oMini => "gpt-4o-mini",
            OpenAiModel::Gpt4o => "gpt-4o",
            OpenAiModel::Custom(id) => id,
        }
    }
}

impl FromStr for OpenAiModel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "gpt-3.5-turbo" => OpenAiModel::Gpt35Turbo,
            "gpt-4o-mini" => OpenAiModel::Gpt4oMini,
            "gpt-4o" => OpenAiModel::Gpt4o,
            other => OpenAiModel::Custom(other.to_string()),
        })
    }
}

/// Client for the OpenAI Chat Completions API
pub struct OpenAiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Bearer credential
    api_key: String,
    /// API root, without trailing slash
    base_url: String,
    /// Model to use
    model: OpenAiModel,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Create a new OpenAI client against the public API
    ///
    /// Only the connection phase has a timeout; a slow answer is waited for.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is blank or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, model: OpenAiModel) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::AuthenticationError(
                "OpenAI API key is empty".to_string(),
            ));
        }

        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
        })
    }

    /// Point the client at a different API root (proxies, compatible servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the endpoint URL for completions
    fn build_endpoint_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Make a completion request
    async fn make_request(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        let body = to_openai_request(self.model.as_str(), request);
        let url = self.build_endpoint_url();

        debug!(model = %body.model, messages = body.messages.len(), "sending chat completion");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_status(status.as_u16(), retry_after, &body));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        debug!(id = %completion.id, model = %completion.model, "chat completion received");

        from_openai_response(completion)
    }
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        self.make_request(request).await
    }

    fn model_id(&self) -> &str {
        self.model.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_model_as_str() {
        assert_eq!(OpenAiModel::Gpt35Turbo.as_str(), "gpt-3.5-turbo");
        assert_eq!(OpenAiModel::Gpt4oMini.as_str(), "gpt-4o-mini");
        assert_eq!(OpenAiModel::Gpt4o.as_str(), "gpt-4o");
        assert_eq!(OpenAiModel::Custom("o3-mini".to_string()).as_str(), "o3-mini");
    }

    #[test]
    fn test_openai_model_from_str() {
        assert_eq!("gpt-3.5-turbo".parse::<OpenAiModel>().unwrap(), OpenAiModel::Gpt35Turbo);
        assert_eq!(" gpt-4o ".parse::<OpenAiModel>().unwrap(), OpenAiModel::Gpt4o);
        assert_eq!(
            "ft:gpt-4o-mini:acme".parse::<OpenAiModel>().unwrap(),
            OpenAiModel::Custom("ft:gpt-4o-mini:acme".to_string())
        );
    }

    #[test]
    fn test_default_model() {
        assert_eq!(OpenAiModel::default(), OpenAiModel::Gpt35Turbo);
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = OpenAiClient::new("  ", OpenAiModel::default()).unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationError(_)));
    }

    #[test]
    fn test_endpoint_url() {
        let client = OpenAiClient::new("sk-test", OpenAiModel::Gpt4oMini)
            .unwrap()
            .with_base_url("http://localhost:8080/v1/");
        assert_eq!(client.build_endpoint_url(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(client.model_id(), "gpt-4o-mini");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = OpenAiClient::new("sk-secret-value", OpenAiModel::default()).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("sk-secret-value"));
        assert!(debug.contains("api.openai.com"));
    }
}

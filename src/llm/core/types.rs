//! Core types for the LLM abstraction layer

use serde::{Deserialize, Serialize};

use super::config::GenerationConfig;

/// Request to generate content from an LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Conversation history
    pub messages: Vec<Message>,
    /// Generation parameters
    pub config: GenerationConfig,
    /// System prompt/instructions
    pub system: Option<String>,
}

impl GenerateRequest {
    /// A single-turn request: one user message under an optional system prompt
    pub fn single_turn(system: Option<String>, user_text: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(user_text)],
            config: GenerationConfig::default(),
            system,
        }
    }

    /// Replace the generation parameters
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }
}

/// A single message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Text content
    pub content: String,
}

impl Message {
    /// Create a new user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: text.into(),
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Human input
    User,
}

/// A completed generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Text of the first choice
    pub text: String,
    /// Why generation stopped, if the provider said
    pub finish_reason: Option<FinishReason>,
    /// Token accounting, if the provider reported it
    pub usage: Option<UsageMetadata>,
}

/// Reason why generation finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural completion
    Stop,
    /// Hit token limit
    MaxTokens,
    /// Blocked by content filters
    ContentFilter,
    /// Provider-specific reason
    Other(String),
}

/// Token usage information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Prompt tokens consumed
    pub input_tokens: u32,
    /// Response tokens generated
    pub output_tokens: u32,
    /// Sum of input and output
    pub total_tokens: u32,
}

impl UsageMetadata {
    /// Create new usage metadata
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

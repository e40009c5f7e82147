//! LLM Abstraction Layer
//!
//! A provider-neutral request/response interface, with an implementation for
//! the OpenAI Chat Completions API.

pub mod core;
pub mod openai;

// Re-export commonly used types
pub use core::{
    config::GenerationConfig,
    error::LlmError,
    provider::LlmProvider,
    types::{FinishReason, GenerateRequest, GenerateResponse, Message, MessageRole, UsageMetadata},
};

pub use openai::{OpenAiClient, OpenAiModel};

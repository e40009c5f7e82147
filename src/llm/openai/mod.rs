//! OpenAI provider implementation
//!
//! This module provides a client for the OpenAI Chat Completions API.

pub mod client;
pub mod mapper;
pub mod types;

// Re-export commonly used types
pub use client::{OpenAiClient, OpenAiModel, DEFAULT_BASE_URL};

//! Mapping between abstraction types and OpenAI-specific types

use std::time::Duration;

use crate::llm::core::{
    error::LlmError,
    types::{FinishReason, GenerateRequest, GenerateResponse, MessageRole, UsageMetadata},
};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, OpenAiErrorResponse};

/// Convert our abstraction request to the Chat Completions format
///
/// The system prompt, when present, becomes the first message.
pub fn to_openai_request(model: &str, request: GenerateRequest) -> ChatCompletionRequest {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);

    if let Some(system) = request.system {
        messages.push(ChatMessage::new("system", system));
    }

    messages.extend(request.messages.into_iter().map(|m| {
        let role = match m.role {
            MessageRole::User => "user",
        };
        ChatMessage::new(role, m.content)
    }));

    ChatCompletionRequest {
        model: model.to_string(),
        messages,
        max_tokens: request.config.max_tokens,
        temperature: request.config.temperature,
        top_p: request.config.top_p,
        stop: request.config.stop_sequences,
    }
}

/// Take the first choice's text verbatim
pub fn from_openai_response(response: ChatCompletionResponse) -> Result<GenerateResponse, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(LlmError::EmptyResponse)?;

    let text = choice.message.content.ok_or(LlmError::EmptyResponse)?;

    Ok(GenerateResponse {
        text,
        finish_reason: choice.finish_reason.map(map_finish_reason),
        usage: response
            .usage
            .map(|u| UsageMetadata {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
    })
}

fn map_finish_reason(reason: String) -> FinishReason {
    match reason.as_str() {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::MaxTokens,
        "content_filter" => FinishReason::ContentFilter,
        _ => FinishReason::Other(reason),
    }
}

/// Classify a non-2xx response
pub fn error_from_status(status: u16, retry_after: Option<Duration>, body: &str) -> LlmError {
    let parsed = serde_json::from_str::<OpenAiErrorResponse>(body).ok();

    match status {
        401 | 403 => LlmError::AuthenticationError(
            parsed
                .map(|p| p.error.message)
                .unwrap_or_else(|| format!("status {}", status)),
        ),
        429 => LlmError::RateLimitExceeded { retry_after },
        _ => match parsed {
            Some(p) => LlmError::ProviderError {
                code: p
                    .error
                    .code
                    .or(p.error.error_type)
                    .unwrap_or_else(|| status.to_string()),
                message: p.error.message,
            },
            None => LlmError::HttpError {
                status,
                body: body.to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::core::{config::GenerationConfig, types::Message};
    use crate::llm::openai::types::{ChatChoice, ChatUsage};

    fn response_with(choices: Vec<ChatChoice>) -> ChatCompletionResponse {
        ChatCompletionResponse {
            id: "chatcmpl-1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            choices,
            usage: Some(ChatUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
        }
    }

    fn choice(content: Option<&str>, finish_reason: &str) -> ChatChoice {
        ChatChoice {
            index: 0,
            message: ChatMessage {
                role: "assistant".to_string(),
                content: content.map(str::to_string),
            },
            finish_reason: Some(finish_reason.to_string()),
        }
    }

    #[test]
    fn test_system_prompt_comes_first() {
        let request = GenerateRequest::single_turn(
            Some("You are a helpful assistant.".to_string()),
            "Hello",
        );
        let mapped = to_openai_request("gpt-3.5-turbo", request);

        assert_eq!(mapped.model, "gpt-3.5-turbo");
        assert_eq!(
            mapped.messages,
            vec![
                ChatMessage::new("system", "You are a helpful assistant."),
                ChatMessage::new("user", "Hello"),
            ]
        );
    }

    #[test]
    fn test_no_system_prompt() {
        let request = GenerateRequest {
            messages: vec![Message::user("Hi"), Message::user("Bye")],
            config: GenerationConfig::default(),
            system: None,
        };
        let mapped = to_openai_request("gpt-4o-mini", request);
        let roles: Vec<&str> = mapped.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["user", "user"]);
    }

    #[test]
    fn test_config_fields_carried_over() {
        let request = GenerateRequest::single_turn(None, "Hi").with_config(
            GenerationConfig::new(256)
                .with_temperature(0.3)
                .with_stop_sequences(vec!["\n\n".to_string()]),
        );
        let mapped = to_openai_request("gpt-4o", request);
        assert_eq!(mapped.max_tokens, Some(256));
        assert_eq!(mapped.temperature, Some(0.3));
        assert_eq!(mapped.top_p, None);
        assert_eq!(mapped.stop, Some(vec!["\n\n".to_string()]));
    }

    #[test]
    fn test_first_choice_verbatim() {
        let response = response_with(vec![
            choice(Some("  First answer\n"), "stop"),
            choice(Some("Second answer"), "stop"),
        ]);
        let generated = from_openai_response(response).unwrap();
        assert_eq!(generated.text, "  First answer\n");
        assert_eq!(generated.finish_reason, Some(FinishReason::Stop));
        assert_eq!(generated.usage, Some(UsageMetadata::new(10, 5)));
    }

    #[test]
    fn test_length_finish_reason() {
        let response = response_with(vec![choice(Some("truncated"), "length")]);
        let generated = from_openai_response(response).unwrap();
        assert_eq!(generated.finish_reason, Some(FinishReason::MaxTokens));
    }

    #[test]
    fn test_no_choices_is_empty_response() {
        let err = from_openai_response(response_with(vec![])).unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[test]
    fn test_null_content_is_empty_response() {
        let err = from_openai_response(response_with(vec![choice(None, "stop")])).unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[test]
    fn test_unauthorized_maps_to_authentication_error() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error", "code": "invalid_api_key"}}"#;
        let err = error_from_status(401, None, body);
        match err {
            LlmError::AuthenticationError(msg) => assert!(msg.contains("Incorrect API key")),
            other => panic!("Expected authentication error, got {:?}", other),
        }
    }

    #[test]
    fn test_too_many_requests_keeps_retry_after() {
        let err = error_from_status(429, Some(Duration::from_secs(7)), "");
        match err {
            LlmError::RateLimitExceeded { retry_after } => {
                assert_eq!(retry_after, Some(Duration::from_secs(7)))
            }
            other => panic!("Expected rate limit error, got {:?}", other),
        }
    }

    #[test]
    fn test_structured_error_maps_to_provider_error() {
        let body = r#"{"error": {"message": "The model `gpt-9` does not exist", "type": "invalid_request_error", "code": "model_not_found"}}"#;
        match error_from_status(404, None, body) {
            LlmError::ProviderError { code, message } => {
                assert_eq!(code, "model_not_found");
                assert!(message.contains("gpt-9"));
            }
            other => panic!("Expected provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_without_code_uses_type() {
        let body = r#"{"error": {"message": "overloaded", "type": "server_error", "code": null}}"#;
        match error_from_status(500, None, body) {
            LlmError::ProviderError { code, .. } => assert_eq!(code, "server_error"),
            other => panic!("Expected provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_unstructured_error_maps_to_http_error() {
        match error_from_status(502, None, "Bad Gateway") {
            LlmError::HttpError { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "Bad Gateway");
            }
            other => panic!("Expected HTTP error, got {:?}", other),
        }
    }
}

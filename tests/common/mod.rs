#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use message_relay::gateway::CompletionGateway;
use message_relay::handlers::AppState;
use message_relay::llm::{GenerateRequest, GenerateResponse, LlmError, LlmProvider};
use message_relay::store::{MessageStore, StoreConfig};
use tempfile::TempDir;

/// Open a fresh file-backed store in a temporary directory
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub async fn setup_store() -> (TempDir, MessageStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("messages.db").display());
    let config = StoreConfig::from_url(&url)
        .expect("Invalid store URL")
        .with_max_connections(2);
    let store = MessageStore::connect(config)
        .await
        .expect("Failed to open store");
    (dir, store)
}

/// Store plus a gateway backed by `provider`
pub async fn setup_app(provider: Arc<ScriptedProvider>) -> (TempDir, AppState) {
    let (dir, store) = setup_store().await;
    let gateway = CompletionGateway::new(provider);
    (dir, AppState::new(store, gateway))
}

/// Fake provider that replays scripted outcomes
///
/// Once the script is exhausted it answers `reply to: <user text>`.
#[derive(Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedProvider {
    pub fn echo() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_script(script: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::from(script)),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Self::with_script(vec![Err(LlmError::HttpError {
            status: 503,
            body: "upstream unavailable".to_string(),
        })])
    }

    pub fn calls(&self) -> Vec<GenerateRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        let user_text = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.calls.lock().unwrap().push(request);

        let next = self.script.lock().unwrap().pop_front();
        let text = match next {
            Some(outcome) => outcome?,
            None => format!("reply to: {}", user_text),
        };

        Ok(GenerateResponse {
            text,
            finish_reason: None,
            usage: None,
        })
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}

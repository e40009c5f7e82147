// Request and response bodies for the HTTP API

use serde::{Deserialize, Serialize};

pub use crate::store::Message;

// Body of POST /messages and PUT /messages/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageContentRequest {
    pub content: String,
}

// Body of a successful DELETE /messages/{id}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

// Body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

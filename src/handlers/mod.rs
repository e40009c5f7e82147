// Handlers module
//
// Each endpoint has a plain async function holding the request's steps and a
// thin warp wrapper that turns its result into a reply or a rejection.

pub mod create_message;
pub mod delete_message;
pub mod list_messages;
pub mod update_message;

pub use create_message::{create_message, create_message_handler};
pub use delete_message::{delete_message, delete_message_handler};
pub use list_messages::{list_messages, list_messages_handler};
pub use update_message::{update_message, update_message_handler};

use crate::gateway::CompletionGateway;
use crate::store::MessageStore;

/// Shared by every request; cloning is cheap
#[derive(Clone)]
pub struct AppState {
    pub store: MessageStore,
    pub gateway: CompletionGateway,
}

impl AppState {
    pub fn new(store: MessageStore, gateway: CompletionGateway) -> Self {
        Self { store, gateway }
    }
}

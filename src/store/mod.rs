//! Message store
//!
//! A single SQLite table of user messages and their generated replies.
//!
//! # Quick Start
//!
//! ```no_run
//! use message_relay::store::{MessageStore, NewMessage, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MessageStore::connect(StoreConfig::from_url("sqlite://chatbot.db")?).await?;
//!
//!     let mut session = store.session().await?;
//!     let user = session.insert(NewMessage::user("Hello")).await?;
//!     session.insert(NewMessage::reply("Hi! How can I help?", user.id)).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod connection;
pub mod error;
pub mod operations;
pub mod types;

pub use client::{MessageStore, Session};
pub use connection::StoreConfig;
pub use error::{Error, Result};
pub use types::{Message, NewMessage};

// HTTP Server modules
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

// Message store
pub mod store;

// Completion gateway and the LLM layer behind it
pub mod gateway;
pub mod llm;

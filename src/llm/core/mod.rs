//! Core abstractions shared by every provider

pub mod config;
pub mod error;
pub mod provider;
pub mod types;

//! Chat-completion integration.
//!
//! The agents drive a chat-completion backend through the [`ChatClient`]
//! trait; [`OpenAIChatClient`] is the bundled implementation covering Azure
//! OpenAI deployments and any OpenAI-compatible endpoint.

mod client;
mod config;
mod error;
mod openai;

pub use client::{ChatClient, ChatResponse};
pub use config::{ProviderConfig, ProviderType};
pub use error::{LlmError, LlmErrorKind};
pub use openai::OpenAIChatClient;

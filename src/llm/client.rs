//! Chat-completion client trait abstraction.
//!
//! The `ChatClient` trait is the seam between the agents and whichever
//! chat-completion backend serves them. Agents depend only on this trait;
//! the backend performs tool selection and argument construction, the
//! agent's dispatch loop performs the actual tool execution.

use crate::llm::error::LlmError;
use crate::messages::{Message, StopReason, ToolCall, ToolDefinition};
use async_trait::async_trait;

/// Response from a chat-completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    /// The generated text content
    pub content: String,
    /// Tool calls requested by the model
    pub tool_calls: Vec<ToolCall>,
    /// The reason the model stopped generating
    pub stop_reason: StopReason,
}

impl ChatResponse {
    /// Returns true if the model requested at least one tool call.
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Trait for chat-completion API clients.
///
/// # Example
///
/// ```ignore
/// use a2a_mesh::llm::{ChatClient, OpenAIChatClient, ProviderConfig};
/// use a2a_mesh::messages::Message;
///
/// let config = ProviderConfig::azure(endpoint, deployment, api_version, api_key);
/// let client = OpenAIChatClient::new(&config)?;
///
/// let messages = vec![Message::user("Hello!")];
/// let response = client.complete(&messages, None).await?;
/// ```
#[async_trait]
pub trait ChatClient: Send + Sync + std::fmt::Debug {
    /// Sends one chat-completion request.
    ///
    /// # Arguments
    ///
    /// * `messages` - The conversation messages, system preamble first
    /// * `tools` - Optional tool definitions available to the model
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// decoded.
    async fn complete(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<ChatResponse, LlmError>;

    /// Returns the name of this provider for logging.
    fn provider_name(&self) -> &'static str;
}

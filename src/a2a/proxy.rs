//! Remote agent proxy.
//!
//! Wraps one remote agent endpoint behind an infallible text-in/text-out
//! call. Every failure mode — application error, malformed envelope,
//! timeout, transport fault — degrades to a descriptive string, because the
//! consumer is a language model that can only reason about text. No retry is
//! attempted; the calling model decides whether to re-invoke.

use crate::a2a::client::A2aClient;
use crate::a2a::error::A2aError;
use crate::a2a::types::SendMessageRequest;
use std::time::Duration;

/// Default timeout budget for one remote agent call.
pub const DEFAULT_PROXY_TIMEOUT: Duration = Duration::from_secs(30);

/// A proxy to one remote A2A agent.
#[derive(Debug, Clone)]
pub struct RemoteAgentProxy {
    /// The remote agent's display name, used in error strings
    agent_name: String,
    /// The remote agent's base URL
    url: String,
    /// Timeout budget for the whole call (discovery + send)
    timeout: Duration,
}

impl RemoteAgentProxy {
    /// Creates a proxy for the agent at `url`.
    #[must_use]
    pub fn new(agent_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            url: url.into(),
            timeout: DEFAULT_PROXY_TIMEOUT,
        }
    }

    /// Sets the timeout budget for one call.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the remote agent's display name.
    #[must_use]
    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    /// Returns the remote agent's base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends one instruction to the remote agent and returns its reply text.
    ///
    /// Single attempt, bounded by the configured timeout. Never panics and
    /// never returns a typed error; all failures come back as descriptive
    /// strings the calling model can read.
    pub async fn invoke(&self, instruction: &str) -> String {
        tracing::info!(
            agent = %self.agent_name,
            %instruction,
            "Sending request to remote agent"
        );

        match self.send(instruction).await {
            Ok(Outcome::Text(text)) => {
                tracing::info!(agent = %self.agent_name, reply = %text, "Remote agent replied");
                text
            }
            Ok(Outcome::RemoteError(message)) => {
                tracing::error!(agent = %self.agent_name, %message, "Remote agent returned error");
                format!("Error from {} agent: {}", self.agent_name, message)
            }
            Ok(Outcome::UnexpectedFormat) => {
                tracing::error!(agent = %self.agent_name, "Unexpected response format");
                format!("Error: Unexpected response format from {} agent", self.agent_name)
            }
            Err(e) if e.is_timeout() => {
                tracing::error!(agent = %self.agent_name, "Timeout waiting for remote agent");
                format!(
                    "Error: The {} agent is taking longer than expected. Please try again.",
                    self.agent_name
                )
            }
            Err(e) => {
                tracing::error!(agent = %self.agent_name, error = %e, "Error connecting to remote agent");
                format!("Error connecting to {} agent: {}", self.agent_name, e)
            }
        }
    }

    /// One discovery-then-send round trip.
    async fn send(&self, instruction: &str) -> Result<Outcome, A2aError> {
        let client = A2aClient::new(&self.url, self.timeout)?;
        let card = client.fetch_card().await?;

        let request = SendMessageRequest::from_instruction(instruction);
        let reply = client.send_message(&card, &request).await?;

        if let Some(error) = reply.error {
            return Ok(Outcome::RemoteError(error.message));
        }

        Ok(match reply.first_text() {
            Some(text) => Outcome::Text(text.to_string()),
            None => Outcome::UnexpectedFormat,
        })
    }
}

/// Decoded outcome of one well-formed reply envelope.
enum Outcome {
    /// The answer text
    Text(String),
    /// The remote agent reported an application-level error
    RemoteError(String),
    /// The envelope decoded but carried no extractable text
    UnexpectedFormat,
}

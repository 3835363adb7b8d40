//! A2A protocol HTTP client.
//!
//! One client instance covers one call: discovery (fetch the remote agent
//! card) followed by a single `message/send` round trip, both under one
//! timeout budget.

use crate::a2a::error::A2aError;
use crate::a2a::types::{AgentCard, SendMessageReply, SendMessageRequest};
use reqwest::Client;
use std::time::Duration;

/// Well-known path of the agent discovery document.
pub const AGENT_CARD_PATH: &str = "/.well-known/agent.json";

/// HTTP client for one remote A2A agent.
#[derive(Debug, Clone)]
pub struct A2aClient {
    /// HTTP client with the call timeout applied
    client: Client,
    /// Remote agent base URL, without trailing slash
    base_url: String,
    /// Call timeout, kept for error reporting
    timeout: Duration,
}

impl A2aClient {
    /// Creates a client for the agent at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `A2aError::invalid_url` if the URL does not parse, or
    /// `A2aError::network` if the HTTP client cannot be created.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, A2aError> {
        url::Url::parse(base_url)
            .map_err(|e| A2aError::invalid_url(base_url, e.to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| A2aError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Fetches the remote agent's discovery card.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, timeout, non-success status, or
    /// an undecodable card.
    pub async fn fetch_card(&self) -> Result<AgentCard, A2aError> {
        let url = format!("{}{}", self.base_url, AGENT_CARD_PATH);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(A2aError::http(status.as_u16(), body));
        }

        response
            .json::<AgentCard>()
            .await
            .map_err(|e| A2aError::decode(format!("invalid agent card: {e}")))
    }

    /// Sends one `message/send` request to the agent named by `card`.
    ///
    /// The card's own URL takes precedence over the discovery URL, matching
    /// protocol semantics: the card is authoritative for where to talk.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, timeout, non-success status, or
    /// an undecodable reply envelope. A decoded envelope carrying an
    /// application-level `error` is NOT an `Err`; the caller inspects it.
    pub async fn send_message(
        &self,
        card: &AgentCard,
        request: &SendMessageRequest,
    ) -> Result<SendMessageReply, A2aError> {
        let url = if card.url.is_empty() {
            self.base_url.clone()
        } else {
            card.url.trim_end_matches('/').to_string()
        };

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(A2aError::http(status.as_u16(), body));
        }

        response
            .json::<SendMessageReply>()
            .await
            .map_err(|e| A2aError::decode(format!("invalid reply envelope: {e}")))
    }

    /// Maps a reqwest failure onto the A2A error taxonomy.
    fn map_send_error(&self, e: reqwest::Error) -> A2aError {
        if e.is_timeout() {
            A2aError::timeout(self.timeout)
        } else {
            A2aError::network(e.to_string())
        }
    }
}

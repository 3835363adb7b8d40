//! A2A protocol wire types.
//!
//! The subset of the A2A protocol this crate speaks: the agent card served
//! at `/.well-known/agent.json`, the JSON-RPC `message/send` envelope, and
//! the success/error reply wrapper around a remote call's result.

use crate::types::{ContextId, MessageId, RequestId};
use serde::{Deserialize, Serialize};

/// JSON-RPC protocol version carried on every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// The method name for sending a message to a remote agent.
pub const METHOD_MESSAGE_SEND: &str = "message/send";

/// Discovery document describing a remote agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    /// The agent's display name
    pub name: String,
    /// What the agent does
    #[serde(default)]
    pub description: String,
    /// The agent's base URL
    pub url: String,
    /// The agent's version string
    #[serde(default)]
    pub version: String,
    /// Optional protocol capabilities
    #[serde(default)]
    pub capabilities: AgentCapabilities,
    /// Skills the agent advertises
    #[serde(default)]
    pub skills: Vec<AgentSkill>,
}

impl AgentCard {
    /// Creates a minimal agent card.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            version: "1.0.0".to_string(),
            capabilities: AgentCapabilities::default(),
            skills: Vec::new(),
        }
    }

    /// Adds a skill to the card.
    #[must_use]
    pub fn with_skill(mut self, skill: AgentSkill) -> Self {
        self.skills.push(skill);
        self
    }
}

/// Protocol capabilities advertised on an agent card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    /// Whether the agent supports streaming replies
    #[serde(default)]
    pub streaming: bool,
    /// Whether the agent supports push notifications
    #[serde(default)]
    pub push_notifications: bool,
}

/// A skill advertised on an agent card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    /// Stable skill identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// What the skill does
    #[serde(default)]
    pub description: String,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// JSON-RPC request envelope for `message/send`.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    /// Always "2.0"
    pub jsonrpc: &'static str,
    /// Unique request identifier
    pub id: RequestId,
    /// Always "message/send"
    pub method: &'static str,
    /// The message parameters
    pub params: MessageSendParams,
}

impl SendMessageRequest {
    /// Builds a request carrying one user instruction as the sole text part.
    ///
    /// Every envelope gets a fresh request id, message id, and context id:
    /// the downstream conversation is one-shot by design, the caller's own
    /// context id never leaks across the delegation boundary.
    #[must_use]
    pub fn from_instruction(instruction: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: RequestId::new(),
            method: METHOD_MESSAGE_SEND,
            params: MessageSendParams {
                message: OutboundMessage {
                    message_id: MessageId::new(),
                    role: "user".to_string(),
                    parts: vec![Part::text(instruction)],
                    context_id: ContextId::generate(),
                },
            },
        }
    }
}

/// Parameters of a `message/send` request.
#[derive(Debug, Clone, Serialize)]
pub struct MessageSendParams {
    /// The message to deliver
    pub message: OutboundMessage,
}

/// The message body inside a `message/send` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    /// Unique message identifier
    pub message_id: MessageId,
    /// Always "user" for outbound delegations
    pub role: String,
    /// Content parts; the instruction is the sole text part
    pub parts: Vec<Part>,
    /// Fresh per-call context id
    pub context_id: ContextId,
}

/// One content part of a message.
///
/// Decoding is deliberately tolerant: some agents tag parts with
/// `"kind": "text"`, others send a bare `{"text": …}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// The part kind; "text" is the only kind this crate produces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Text payload, when this is a text part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    /// Creates a text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: Some("text".to_string()),
            text: Some(text.into()),
        }
    }
}

/// Reply envelope from a `message/send` call.
///
/// Exactly one of `result` and `error` is populated on a well-formed reply.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageReply {
    /// Success payload
    #[serde(default)]
    pub result: Option<ReplyResult>,
    /// Error payload
    #[serde(default)]
    pub error: Option<RpcError>,
}

impl SendMessageReply {
    /// Extracts the first text part of the success payload, if any.
    ///
    /// Tolerates both reply shapes seen in the wild: parts directly on the
    /// result, and parts nested under `result.status.message`.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        let result = self.result.as_ref()?;

        if let Some(text) = first_text_part(result.parts.as_deref()) {
            return Some(text);
        }

        let status_message = result.status.as_ref()?.message.as_ref()?;
        first_text_part(status_message.parts.as_deref())
    }
}

fn first_text_part(parts: Option<&[Part]>) -> Option<&str> {
    parts?.iter().find_map(|p| p.text.as_deref())
}

/// Success payload of a reply envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyResult {
    /// Content parts, when the agent replies with a plain message
    #[serde(default)]
    pub parts: Option<Vec<Part>>,
    /// Task status, when the agent replies with a task object
    #[serde(default)]
    pub status: Option<ReplyStatus>,
}

/// Task status inside a reply result.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyStatus {
    /// The status message, whose parts carry the answer text
    #[serde(default)]
    pub message: Option<ReplyMessage>,
}

/// Message inside a task status.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyMessage {
    /// Content parts
    #[serde(default)]
    pub parts: Option<Vec<Part>>,
}

/// Error payload of a reply envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    /// JSON-RPC error code, when present
    #[serde(default)]
    pub code: Option<i64>,
    /// Human-readable error message
    #[serde(default = "unknown_error")]
    pub message: String,
}

fn unknown_error() -> String {
    "Unknown error occurred".to_string()
}

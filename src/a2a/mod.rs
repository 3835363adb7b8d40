//! A2A protocol support.
//!
//! Client-side plumbing for talking to peer agents: wire types
//! ([`AgentCard`], the `message/send` envelope), the [`A2aClient`] that
//! performs discovery and send, and the [`RemoteAgentProxy`] that turns a
//! remote endpoint into an infallible text-in/text-out call.

mod client;
mod error;
mod proxy;
mod types;

pub use client::{A2aClient, AGENT_CARD_PATH};
pub use error::{A2aError, A2aErrorKind};
pub use proxy::{RemoteAgentProxy, DEFAULT_PROXY_TIMEOUT};
pub use types::{
    AgentCapabilities, AgentCard, AgentSkill, MessageSendParams, OutboundMessage, Part,
    ReplyMessage, ReplyResult, ReplyStatus, RpcError, SendMessageReply, SendMessageRequest,
    JSONRPC_VERSION, METHOD_MESSAGE_SEND,
};

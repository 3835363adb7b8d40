//! Host-agent orchestration for A2A agent networks.
//!
//! This crate builds LLM agents that cooperate over the A2A protocol. A
//! [`HostAgent`](agent::HostAgent) owns no capabilities of its own: each
//! configured remote agent endpoint becomes one function-calling tool, and
//! the model decides per turn which remote agents to consult. A
//! [`WorkerAgent`](agent::WorkerAgent) answers requests itself, with tools
//! collected from MCP plugin servers.
//!
//! # Architecture
//!
//! - [`a2a`] — agent card discovery, the `message/send` envelope, and the
//!   [`RemoteAgentProxy`](a2a::RemoteAgentProxy) that degrades every remote
//!   failure to text the model can read
//! - [`tools`] — the dynamic tool registry and the executor trait
//! - [`conversation`] — per-context transcripts with least-recently-used
//!   eviction
//! - [`agent`] — the host and worker agents and their dispatch loop
//! - [`mcp`] — SSE connections to MCP plugin servers
//! - [`llm`] — the [`ChatClient`](llm::ChatClient) seam and its Azure
//!   OpenAI / OpenAI-compatible implementation
//!
//! # Example
//!
//! ```ignore
//! use a2a_mesh::prelude::*;
//! use std::sync::Arc;
//!
//! let config = HostAgentConfig::new("Support Host", "Routes customer questions.")
//!     .with_endpoint(EndpointConfig::new(
//!         "http://localhost:8001",
//!         "Order Agent",
//!         "check_order_status",
//!         "Looks up order status",
//!     ));
//! let chat = Arc::new(OpenAIChatClient::new(&provider)?);
//! let host = HostAgent::new(config, chat)?;
//! host.initialize()?;
//!
//! let ctx = ContextId::parse("session-1")?;
//! let answer = host.process("Where is order ORD123?", &ctx).await?;
//! ```

pub mod a2a;
pub mod agent;
pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod mcp;
pub mod messages;
pub mod tools;
pub mod types;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::a2a::RemoteAgentProxy;
    pub use crate::agent::{AgentState, HostAgent, HostAgentConfig, WorkerAgent, WorkerAgentConfig};
    pub use crate::config::{EndpointConfig, MeshConfig};
    pub use crate::conversation::{Conversation, ConversationStore};
    pub use crate::error::{AgentError, AgentErrorKind};
    pub use crate::llm::{ChatClient, ChatResponse, OpenAIChatClient, ProviderConfig};
    pub use crate::messages::{Message, MessageRole, ToolCall, ToolDefinition};
    pub use crate::tools::{ToolBinding, ToolExecutor, ToolRegistry};
    pub use crate::types::ContextId;
}

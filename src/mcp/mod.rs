//! MCP plugin support.
//!
//! A worker agent extends its tool set with plugins: external servers
//! speaking the Model Context Protocol over SSE. The [`McpConnection`]
//! handles the transport and handshake; [`plugin_binding`] adapts each
//! advertised tool into a registry binding.

mod client;
mod error;
mod plugin;
mod types;

pub use client::McpConnection;
pub use error::{McpError, McpErrorKind};
pub use plugin::plugin_binding;
pub use types::{CallToolResult, McpContent, McpTool, SseEvent, ToolsListResult, PROTOCOL_VERSION};

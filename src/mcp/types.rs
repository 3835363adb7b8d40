//! MCP wire types.
//!
//! The subset of the Model Context Protocol a plugin-hosting agent needs:
//! the initialize handshake, tool listing, and tool calls, all carried as
//! JSON-RPC 2.0 over an SSE transport.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol revision this client speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// One server-sent event, after field reassembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseEvent {
    /// Event type; "message" when the server omits the field
    pub event: String,
    /// Event payload, with multi-line data joined by newlines
    pub data: String,
}

/// A tool advertised by a plugin server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpTool {
    /// Tool name as the server knows it
    pub name: String,
    /// Tool description, when provided
    #[serde(default)]
    pub description: String,
    /// JSON schema for the tool's arguments
    #[serde(rename = "inputSchema", default = "default_schema")]
    pub input_schema: Value,
}

fn default_schema() -> Value {
    serde_json::json!({"type": "object"})
}

/// Result payload of `tools/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolsListResult {
    /// The advertised tools
    #[serde(default)]
    pub tools: Vec<McpTool>,
}

/// Result payload of `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolResult {
    /// Content blocks produced by the tool
    #[serde(default)]
    pub content: Vec<McpContent>,
    /// True when the tool itself reported a failure
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl CallToolResult {
    /// Flattens the result to text: the first text block, or the raw
    /// content serialized as JSON when no text block exists.
    #[must_use]
    pub fn into_text(self) -> String {
        for block in &self.content {
            if block.content_type == "text" {
                if let Some(text) = &block.text {
                    return text.clone();
                }
            }
        }
        serde_json::to_string(&self.content).unwrap_or_default()
    }
}

/// One content block in a tool call result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpContent {
    /// Block type, e.g. "text"
    #[serde(rename = "type")]
    pub content_type: String,
    /// Text payload for "text" blocks
    #[serde(default)]
    pub text: Option<String>,
}

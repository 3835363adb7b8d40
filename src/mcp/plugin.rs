//! Plugin tool bindings.
//!
//! Adapts a tool advertised by an MCP plugin server into a [`ToolBinding`]
//! the registry can hold. The exposed name is sanitized into a callable
//! identifier; the server-side name is kept verbatim for the actual call.

use crate::mcp::client::McpConnection;
use crate::mcp::types::McpTool;
use crate::messages::ToolDefinition;
use crate::tools::{FunctionName, ToolBinding, ToolError, ToolExecutionFuture, ToolExecutor};
use serde_json::Value;
use std::sync::Arc;

/// Builds a binding for one plugin tool.
///
/// # Errors
///
/// Returns `ToolError::invalid_name` when the tool's name cannot be
/// sanitized into a callable identifier.
pub fn plugin_binding(
    connection: Arc<McpConnection>,
    tool: McpTool,
) -> Result<ToolBinding, ToolError> {
    let exposed = FunctionName::sanitize(&tool.name)?;
    let definition = ToolDefinition {
        name: exposed.as_str().to_string(),
        description: tool.description.clone(),
        input_schema: tool.input_schema.clone(),
    };
    Ok(ToolBinding::new(
        definition,
        Arc::new(PluginToolExecutor {
            connection,
            remote_name: tool.name,
        }),
    ))
}

/// Executor that forwards a call to a plugin server.
#[derive(Debug)]
struct PluginToolExecutor {
    connection: Arc<McpConnection>,
    /// The tool name as the server advertised it
    remote_name: String,
}

impl ToolExecutor for PluginToolExecutor {
    fn execute(&self, args: Value) -> ToolExecutionFuture {
        let connection = self.connection.clone();
        let remote_name = self.remote_name.clone();
        Box::pin(async move {
            connection
                .call_tool(&remote_name, args)
                .await
                .map(Value::String)
                .map_err(|e| ToolError::execution_failed(&remote_name, e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool(name: &str) -> McpTool {
        McpTool {
            name: name.to_string(),
            description: "A plugin tool".to_string(),
            input_schema: json!({"type": "object"}),
        }
    }

    #[test]
    fn sanitizes_exposed_name_on_binding() {
        // No live connection is needed to validate the name mapping.
        assert_eq!(
            FunctionName::sanitize(&tool("get-weather").name)
                .unwrap()
                .as_str(),
            "get_weather"
        );
    }

    #[test]
    fn unusable_names_are_rejected() {
        assert!(FunctionName::sanitize(&tool("---").name).is_err());
    }
}

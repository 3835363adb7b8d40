//! Remote agent delegation tools.
//!
//! Turns an [`EndpointConfig`] into a [`ToolBinding`] whose executor
//! forwards the model's instruction to the remote agent over A2A. The
//! executor is infallible at the delegation boundary: remote failures come
//! back as result text, never as a registry error.

use crate::a2a::RemoteAgentProxy;
use crate::config::EndpointConfig;
use crate::messages::ToolDefinition;
use crate::tools::definition::{ToolBinding, ToolExecutionFuture, ToolExecutor};
use crate::tools::error::ToolError;
use crate::tools::name::FunctionName;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Builds a tool binding that delegates to the remote agent at `endpoint`.
///
/// # Errors
///
/// Returns `ToolError::invalid_name` when the endpoint's function name is
/// not a valid callable identifier.
pub fn remote_binding(
    endpoint: &EndpointConfig,
    timeout: Duration,
) -> Result<ToolBinding, ToolError> {
    let name = FunctionName::parse(&endpoint.function_name)?;

    let definition = ToolDefinition {
        name: name.as_str().to_string(),
        description: format!(
            "Send a request to {}: {}",
            endpoint.name, endpoint.description
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "instruction": {
                    "type": "string",
                    "description": "The request to forward to the remote agent"
                }
            },
            "required": ["instruction"]
        }),
    };

    let proxy = RemoteAgentProxy::new(&endpoint.name, &endpoint.url).with_timeout(timeout);
    Ok(ToolBinding::new(
        definition,
        Arc::new(RemoteToolExecutor { name, proxy }),
    ))
}

/// Executor that forwards one instruction to a remote agent.
#[derive(Debug)]
struct RemoteToolExecutor {
    name: FunctionName,
    proxy: RemoteAgentProxy,
}

impl RemoteToolExecutor {
    fn instruction(&self, args: &Value) -> Result<String, ToolError> {
        let text = match args {
            Value::Object(map) => map.get("instruction").and_then(Value::as_str),
            Value::String(s) => Some(s.as_str()),
            _ => None,
        };
        text.map(str::to_string).ok_or_else(|| {
            ToolError::invalid_arguments(self.name.as_str(), "missing 'instruction' string")
        })
    }
}

impl ToolExecutor for RemoteToolExecutor {
    fn execute(&self, args: Value) -> ToolExecutionFuture {
        let proxy = self.proxy.clone();
        let instruction = self.instruction(&args);
        Box::pin(async move {
            let instruction = instruction?;
            // Proxy failures degrade to text; only malformed arguments error.
            Ok(Value::String(proxy.invoke(&instruction).await))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> EndpointConfig {
        EndpointConfig::new(
            "http://localhost:8001",
            "Order Agent",
            "check_order_status",
            "Looks up order status",
        )
    }

    #[test]
    fn binding_uses_configured_function_name() {
        let binding = remote_binding(&endpoint(), Duration::from_secs(30)).unwrap();
        assert_eq!(binding.name(), "check_order_status");
    }

    #[test]
    fn description_names_the_remote_agent() {
        let binding = remote_binding(&endpoint(), Duration::from_secs(30)).unwrap();
        assert_eq!(
            binding.definition.description,
            "Send a request to Order Agent: Looks up order status"
        );
    }

    #[test]
    fn schema_requires_instruction() {
        let binding = remote_binding(&endpoint(), Duration::from_secs(30)).unwrap();
        assert_eq!(
            binding.definition.input_schema["required"],
            json!(["instruction"])
        );
    }

    #[test]
    fn invalid_function_name_is_rejected() {
        let mut bad = endpoint();
        bad.function_name = "order status".to_string();
        assert!(remote_binding(&bad, Duration::from_secs(30)).is_err());
    }

    #[tokio::test]
    async fn missing_instruction_is_invalid_arguments() {
        let binding = remote_binding(&endpoint(), Duration::from_secs(30)).unwrap();
        let err = binding
            .executor
            .execute(json!({"other": 1}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("instruction"));
    }

    #[tokio::test]
    async fn bare_string_arguments_are_accepted() {
        let mut unreachable = endpoint();
        unreachable.url = "not a url".to_string();
        let binding = remote_binding(&unreachable, Duration::from_secs(1)).unwrap();
        let result = binding
            .executor
            .execute(json!("where is my order?"))
            .await
            .unwrap();
        // The bad URL degrades to error text rather than an Err.
        assert!(result
            .as_str()
            .unwrap()
            .starts_with("Error connecting to Order Agent agent:"));
    }
}

//! Tool executor trait and bindings.
//!
//! A [`ToolBinding`] pairs a [`ToolDefinition`] (what the model sees) with
//! a [`ToolExecutor`] (what runs when the model calls it).

use crate::messages::ToolDefinition;
use crate::tools::error::ToolError;
use serde_json::Value;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// The result type for tool execution futures.
pub type ToolExecutionFuture =
    Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send + 'static>>;

/// Trait for executing tools.
///
/// Implement this trait to add a local capability; remote agent delegations
/// and MCP plugin calls ship their own implementations.
///
/// # Example
///
/// ```rust
/// use a2a_mesh::tools::{ToolExecutor, ToolExecutionFuture};
/// use serde_json::Value;
///
/// #[derive(Debug)]
/// struct EchoTool;
///
/// impl ToolExecutor for EchoTool {
///     fn execute(&self, args: Value) -> ToolExecutionFuture {
///         Box::pin(async move { Ok(args) })
///     }
/// }
/// ```
pub trait ToolExecutor: Send + Sync + Debug {
    /// Executes the tool with the given JSON arguments.
    fn execute(&self, args: Value) -> ToolExecutionFuture;
}

/// A named, callable delegation target visible to the model.
#[derive(Debug, Clone)]
pub struct ToolBinding {
    /// The definition exposed to the model
    pub definition: ToolDefinition,
    /// The executor invoked when the model calls this tool
    pub executor: Arc<dyn ToolExecutor>,
}

impl ToolBinding {
    /// Creates a binding from a definition and executor.
    #[must_use]
    pub fn new(definition: ToolDefinition, executor: Arc<dyn ToolExecutor>) -> Self {
        Self {
            definition,
            executor,
        }
    }

    /// Returns the binding's tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct EchoTool;

    impl ToolExecutor for EchoTool {
        fn execute(&self, args: Value) -> ToolExecutionFuture {
            Box::pin(async move { Ok(args) })
        }
    }

    #[test]
    fn binding_exposes_name() {
        let binding = ToolBinding::new(
            ToolDefinition {
                name: "echo".to_string(),
                description: "Echoes its arguments".to_string(),
                input_schema: serde_json::json!({"type": "object"}),
            },
            Arc::new(EchoTool),
        );
        assert_eq!(binding.name(), "echo");
    }

    #[tokio::test]
    async fn echo_executor_returns_args() {
        let executor = EchoTool;
        let result = executor.execute(serde_json::json!({"a": 1})).await.unwrap();
        assert_eq!(result, serde_json::json!({"a": 1}));
    }

    #[test]
    fn bindings_are_cheaply_cloneable() {
        let binding = ToolBinding::new(
            ToolDefinition {
                name: "echo".to_string(),
                description: String::new(),
                input_schema: serde_json::json!({}),
            },
            Arc::new(EchoTool),
        );
        let clone = binding.clone();
        assert!(Arc::ptr_eq(&binding.executor, &clone.executor));
    }
}

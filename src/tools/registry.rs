//! Tool registry.
//!
//! The registry owns the live set of tool bindings for one agent. Bindings
//! can be added after construction without disturbing in-flight calls:
//! readers take an immutable [`ToolSnapshot`] per turn and see either the
//! old or the new set atomically, never a partially-updated one.

use crate::messages::ToolDefinition;
use crate::tools::definition::ToolBinding;
use crate::tools::error::ToolError;
use crate::tools::name::FunctionName;
use std::sync::RwLock;

/// Registry of tool bindings for one agent.
///
/// Registration order is preserved; it is the order tools are presented to
/// the model.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    /// Registered bindings in registration order
    bindings: RwLock<Vec<ToolBinding>>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a binding.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::invalid_name` if the binding's name is not a
    /// valid callable identifier, or `ToolError::already_registered` if the
    /// name is taken.
    pub fn register(&self, binding: ToolBinding) -> Result<(), ToolError> {
        FunctionName::parse(binding.name())?;

        let mut bindings = self.bindings.write().expect("registry lock poisoned");
        if bindings.iter().any(|b| b.name() == binding.name()) {
            return Err(ToolError::already_registered(binding.name()));
        }

        tracing::info!(tool_name = %binding.name(), "Tool registered");
        bindings.push(binding);
        Ok(())
    }

    /// Takes an immutable snapshot of the current binding set.
    #[must_use]
    pub fn snapshot(&self) -> ToolSnapshot {
        let bindings = self.bindings.read().expect("registry lock poisoned");
        ToolSnapshot {
            bindings: bindings.clone(),
        }
    }

    /// Returns the number of registered bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.read().expect("registry lock poisoned").len()
    }

    /// Returns true if no bindings are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if a tool with the given name is registered.
    #[must_use]
    pub fn has_tool(&self, name: &str) -> bool {
        self.bindings
            .read()
            .expect("registry lock poisoned")
            .iter()
            .any(|b| b.name() == name)
    }
}

/// An immutable view of the binding set, valid for one turn.
#[derive(Debug, Clone)]
pub struct ToolSnapshot {
    bindings: Vec<ToolBinding>,
}

impl ToolSnapshot {
    /// Returns the bindings in registration order.
    #[must_use]
    pub fn bindings(&self) -> &[ToolBinding] {
        &self.bindings
    }

    /// Looks up a binding by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolBinding> {
        self.bindings.iter().find(|b| b.name() == name)
    }

    /// Returns the tool definitions to present to the model.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.bindings.iter().map(|b| b.definition.clone()).collect()
    }

    /// Returns true if the snapshot holds no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

//! Tool error types.

use std::fmt;

/// Errors that can occur in the tool registry or during tool execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    /// The specific error that occurred
    pub kind: ToolErrorKind,
}

/// Specific tool error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolErrorKind {
    /// No tool with the given name is registered
    NotFound {
        /// The name that was looked up
        tool_name: String,
    },
    /// A tool with the given name is already registered
    AlreadyRegistered {
        /// The conflicting name
        tool_name: String,
    },
    /// The tool name is not a valid callable identifier
    InvalidName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },
    /// The tool's arguments did not match its schema
    InvalidArguments {
        /// The tool that rejected the arguments
        tool_name: String,
        /// Why the arguments were rejected
        reason: String,
    },
    /// Tool execution failed
    ExecutionFailed {
        /// The tool that failed
        tool_name: String,
        /// Description of the failure
        reason: String,
    },
}

impl ToolError {
    /// Creates a new ToolError with the given kind.
    #[must_use]
    pub fn new(kind: ToolErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(tool_name: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound {
            tool_name: tool_name.into(),
        })
    }

    /// Creates an already registered error.
    #[must_use]
    pub fn already_registered(tool_name: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::AlreadyRegistered {
            tool_name: tool_name.into(),
        })
    }

    /// Creates an invalid name error.
    #[must_use]
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidName {
            name: name.into(),
            reason: reason.into(),
        })
    }

    /// Creates an invalid arguments error.
    #[must_use]
    pub fn invalid_arguments(tool_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArguments {
            tool_name: tool_name.into(),
            reason: reason.into(),
        })
    }

    /// Creates an execution failed error.
    #[must_use]
    pub fn execution_failed(tool_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::ExecutionFailed {
            tool_name: tool_name.into(),
            reason: reason.into(),
        })
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ToolErrorKind::NotFound { tool_name } => {
                write!(f, "tool '{tool_name}' is not registered")
            }
            ToolErrorKind::AlreadyRegistered { tool_name } => {
                write!(
                    f,
                    "tool '{tool_name}' is already registered; function names must be unique"
                )
            }
            ToolErrorKind::InvalidName { name, reason } => {
                write!(f, "'{name}' is not a valid function name: {reason}")
            }
            ToolErrorKind::InvalidArguments { tool_name, reason } => {
                write!(f, "invalid arguments for tool '{tool_name}': {reason}")
            }
            ToolErrorKind::ExecutionFailed { tool_name, reason } => {
                write!(f, "tool '{tool_name}' failed: {reason}")
            }
        }
    }
}

impl std::error::Error for ToolError {}

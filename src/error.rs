//! Agent error types.
//!
//! Errors about an agent's own contract (bad configuration, empty input,
//! wrong lifecycle state) surface here as hard failures. Failures one hop
//! downstream — a peer agent or a plugin — are absorbed into tool-result
//! text before they ever reach this type, because the consumer of those
//! failures is a language model that can only act on text.

use crate::agent::AgentState;
use crate::llm::LlmError;
use crate::tools::ToolError;
use std::fmt;

/// Errors that can occur in a host or worker agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentError {
    /// The agent that reported the error, if known
    pub agent: Option<String>,
    /// The specific error that occurred
    pub kind: AgentErrorKind,
}

/// Specific agent error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentErrorKind {
    /// Construction-time configuration error
    Configuration {
        /// The configuration field that was invalid
        field: String,
        /// Why it was invalid
        reason: String,
    },
    /// `process` was called with empty user input
    EmptyInput,
    /// The agent is not in a state that allows the requested operation
    InvalidState {
        /// The state the agent was in
        state: AgentState,
        /// The operation that was attempted
        operation: String,
    },
    /// The chat-completion service failed for this turn
    Llm {
        /// The underlying chat-completion error
        source: LlmError,
    },
    /// A tool binding could not be registered
    ToolRegistration {
        /// The underlying registry error
        source: ToolError,
    },
}

impl AgentError {
    /// Creates a new AgentError with the given kind.
    #[must_use]
    pub fn new(kind: AgentErrorKind) -> Self {
        Self { agent: None, kind }
    }

    /// Attaches the reporting agent's name.
    #[must_use]
    pub fn for_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Configuration {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Creates an empty input error.
    #[must_use]
    pub fn empty_input() -> Self {
        Self::new(AgentErrorKind::EmptyInput)
    }

    /// Creates an invalid state error.
    #[must_use]
    pub fn invalid_state(state: AgentState, operation: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::InvalidState {
            state,
            operation: operation.into(),
        })
    }

    /// Creates a chat-completion error.
    #[must_use]
    pub fn llm(source: LlmError) -> Self {
        Self::new(AgentErrorKind::Llm { source })
    }

    /// Creates a tool registration error.
    #[must_use]
    pub fn tool_registration(source: ToolError) -> Self {
        Self::new(AgentErrorKind::ToolRegistration { source })
    }

    /// Returns true if this error is the empty input precondition violation.
    #[must_use]
    pub fn is_empty_input(&self) -> bool {
        matches!(self.kind, AgentErrorKind::EmptyInput)
    }

    /// Returns true if this is a construction-time configuration error.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, AgentErrorKind::Configuration { .. })
    }
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(agent) = &self.agent {
            write!(f, "[{agent}] ")?;
        }
        match &self.kind {
            AgentErrorKind::Configuration { field, reason } => {
                write!(f, "invalid configuration for '{field}': {reason}")
            }
            AgentErrorKind::EmptyInput => {
                write!(f, "user input cannot be empty")
            }
            AgentErrorKind::InvalidState { state, operation } => {
                write!(f, "cannot {operation} while agent is {state}")
            }
            AgentErrorKind::Llm { source } => {
                write!(f, "chat completion failed: {source}")
            }
            AgentErrorKind::ToolRegistration { source } => {
                write!(f, "tool registration failed: {source}")
            }
        }
    }
}

impl std::error::Error for AgentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            AgentErrorKind::Llm { source } => Some(source),
            AgentErrorKind::ToolRegistration { source } => Some(source),
            _ => None,
        }
    }
}

impl From<LlmError> for AgentError {
    fn from(source: LlmError) -> Self {
        Self::llm(source)
    }
}

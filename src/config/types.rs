//! Configuration types.

use crate::error::AgentError;
use crate::llm::ProviderConfig;
use crate::tools::FunctionName;
use serde::{Deserialize, Serialize};

/// One remote agent endpoint a host agent delegates to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the remote agent
    pub url: String,
    /// Human-readable display name, used in error strings and prompts
    pub name: String,
    /// The callable identifier exposed to the model for this endpoint
    pub function_name: String,
    /// What the remote agent does, surfaced in the tool description
    #[serde(default)]
    pub description: String,
}

impl EndpointConfig {
    /// Creates an endpoint descriptor.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        name: impl Into<String>,
        function_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            function_name: function_name.into(),
            description: description.into(),
        }
    }

    /// Validates this endpoint descriptor.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the function name is missing or
    /// not a callable identifier, or when the URL does not parse.
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.function_name.is_empty() {
            return Err(AgentError::configuration(
                "function_name",
                format!("missing for endpoint '{}'", self.name),
            ));
        }
        FunctionName::parse(&self.function_name)
            .map_err(|e| AgentError::configuration("function_name", e.to_string()))?;
        url::Url::parse(&self.url).map_err(|e| {
            AgentError::configuration("url", format!("'{}' is not a valid URL: {e}", self.url))
        })?;
        Ok(())
    }
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Chat-completion provider settings
    #[serde(default)]
    pub llm: Option<ProviderConfig>,
    /// Agent identity
    #[serde(default)]
    pub agent: AgentSection,
    /// Remote agent endpoints for a host agent
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
    /// MCP plugin server URLs for a worker agent
    #[serde(default)]
    pub mcp_urls: Vec<String>,
    /// Operational limits
    #[serde(default)]
    pub limits: LimitsSection,
}

/// Agent identity settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSection {
    /// Display name for the agent
    #[serde(default = "default_agent_name")]
    pub name: String,
    /// One-line description of what the agent does
    #[serde(default)]
    pub description: String,
    /// System message override; synthesized from endpoints when absent
    #[serde(default)]
    pub system_message: Option<String>,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            description: String::new(),
            system_message: None,
        }
    }
}

fn default_agent_name() -> String {
    "Host Agent".to_string()
}

/// Operational limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSection {
    /// Maximum conversations retained before least-recently-used eviction
    #[serde(default = "default_max_conversations")]
    pub max_conversations: usize,
    /// Maximum tool-call rounds per turn before forcing a final answer
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: usize,
    /// Per-call timeout for remote agent delegation, in seconds
    #[serde(default = "default_proxy_timeout_secs")]
    pub proxy_timeout_secs: u64,
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            max_conversations: default_max_conversations(),
            max_tool_rounds: default_max_tool_rounds(),
            proxy_timeout_secs: default_proxy_timeout_secs(),
        }
    }
}

fn default_max_conversations() -> usize {
    1024
}

fn default_max_tool_rounds() -> usize {
    8
}

fn default_proxy_timeout_secs() -> u64 {
    30
}

impl MeshConfig {
    /// Validates every endpoint descriptor.
    ///
    /// # Errors
    ///
    /// Returns the first endpoint validation failure.
    pub fn validate(&self) -> Result<(), AgentError> {
        for endpoint in &self.endpoints {
            endpoint.validate()?;
        }
        Ok(())
    }
}

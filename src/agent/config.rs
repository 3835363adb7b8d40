//! Agent configuration.

use crate::config::EndpointConfig;
use std::time::Duration;

/// Default timeout for one remote agent delegation.
pub const DEFAULT_PROXY_TIMEOUT: Duration = Duration::from_secs(30);
/// Default timeout for connecting to one plugin server.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default maximum tool-call rounds per turn.
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;
/// Default bound on retained conversations.
pub const DEFAULT_MAX_CONVERSATIONS: usize = 1024;

/// Configuration for a host agent.
#[derive(Debug, Clone)]
pub struct HostAgentConfig {
    /// Display name for the agent
    pub name: String,
    /// One-line description of the agent's purpose
    pub description: String,
    /// Remote agent endpoints to delegate to
    pub endpoints: Vec<EndpointConfig>,
    /// System message override; synthesized from endpoints when absent
    pub system_message: Option<String>,
    /// Timeout budget for one remote agent call
    pub proxy_timeout: Duration,
    /// Maximum tool-call rounds per turn
    pub max_tool_rounds: usize,
    /// Bound on retained conversations
    pub max_conversations: usize,
}

impl Default for HostAgentConfig {
    fn default() -> Self {
        Self {
            name: "Host Agent".to_string(),
            description: "Coordinates specialized remote agents.".to_string(),
            endpoints: Vec::new(),
            system_message: None,
            proxy_timeout: DEFAULT_PROXY_TIMEOUT,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            max_conversations: DEFAULT_MAX_CONVERSATIONS,
        }
    }
}

impl HostAgentConfig {
    /// Creates a config with the given name and description.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Adds a remote agent endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: EndpointConfig) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Overrides the synthesized system message.
    #[must_use]
    pub fn with_system_message(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = Some(system_message.into());
        self
    }

    /// Sets the per-delegation timeout.
    #[must_use]
    pub fn with_proxy_timeout(mut self, timeout: Duration) -> Self {
        self.proxy_timeout = timeout;
        self
    }

    /// Sets the maximum tool-call rounds per turn.
    #[must_use]
    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds.max(1);
        self
    }

    /// Sets the bound on retained conversations.
    #[must_use]
    pub fn with_max_conversations(mut self, bound: usize) -> Self {
        self.max_conversations = bound;
        self
    }

    /// Returns the effective system message: the override if set, otherwise
    /// one synthesized from the agent's identity and its endpoints.
    #[must_use]
    pub fn effective_system_message(&self) -> String {
        if let Some(message) = &self.system_message {
            return message.clone();
        }
        let mut message = format!(
            "You are {}. {}\n\nYou coordinate specialized remote agents. \
             Delegate requests to them using the functions below and combine \
             their answers for the user.",
            self.name, self.description
        );
        if !self.endpoints.is_empty() {
            message.push_str("\n\nAvailable agents:");
            for endpoint in &self.endpoints {
                message.push_str(&format!(
                    "\n- {} (use function '{}'): {}",
                    endpoint.name, endpoint.function_name, endpoint.description
                ));
            }
        }
        message
    }
}

/// Configuration for a worker agent.
#[derive(Debug, Clone)]
pub struct WorkerAgentConfig {
    /// Display name for the agent
    pub name: String,
    /// One-line description of the agent's purpose
    pub description: String,
    /// MCP plugin server URLs to connect to
    pub mcp_urls: Vec<String>,
    /// System message override; synthesized from the identity when absent
    pub system_message: Option<String>,
    /// Timeout budget for connecting to one plugin server
    pub connect_timeout: Duration,
    /// Maximum tool-call rounds per turn
    pub max_tool_rounds: usize,
    /// Bound on retained conversations
    pub max_conversations: usize,
}

impl Default for WorkerAgentConfig {
    fn default() -> Self {
        Self {
            name: "Worker Agent".to_string(),
            description: "Answers requests using its plugin tools.".to_string(),
            mcp_urls: Vec::new(),
            system_message: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            max_conversations: DEFAULT_MAX_CONVERSATIONS,
        }
    }
}

impl WorkerAgentConfig {
    /// Creates a config with the given name and description.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Adds a plugin server URL.
    #[must_use]
    pub fn with_mcp_url(mut self, url: impl Into<String>) -> Self {
        self.mcp_urls.push(url.into());
        self
    }

    /// Overrides the synthesized system message.
    #[must_use]
    pub fn with_system_message(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = Some(system_message.into());
        self
    }

    /// Sets the plugin connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the maximum tool-call rounds per turn.
    #[must_use]
    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds.max(1);
        self
    }

    /// Returns the effective system message.
    #[must_use]
    pub fn effective_system_message(&self) -> String {
        match &self.system_message {
            Some(message) => message.clone(),
            None => format!("You are {}. {}", self.name, self.description),
        }
    }
}

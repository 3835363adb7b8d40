//! The worker agent.
//!
//! A worker agent answers requests itself, using tools collected from MCP
//! plugin servers during initialization. Plugin availability is best
//! effort: an unreachable server or a bad tool name costs that capability,
//! never the agent.

use crate::agent::config::WorkerAgentConfig;
use crate::agent::dispatch::run_turn;
use crate::agent::state::{AgentState, TurnGuard};
use crate::conversation::ConversationStore;
use crate::error::AgentError;
use crate::llm::ChatClient;
use crate::mcp::{plugin_binding, McpConnection};
use crate::messages::Message;
use crate::tools::ToolRegistry;
use crate::types::ContextId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An agent that serves requests with tools from MCP plugin servers.
#[derive(Debug)]
pub struct WorkerAgent {
    config: WorkerAgentConfig,
    chat: Arc<dyn ChatClient>,
    registry: ToolRegistry,
    store: ConversationStore,
    state: Mutex<AgentState>,
    active_turns: AtomicUsize,
    connections: Mutex<Vec<Arc<McpConnection>>>,
}

impl WorkerAgent {
    /// Creates a worker agent from its configuration.
    #[must_use]
    pub fn new(config: WorkerAgentConfig, chat: Arc<dyn ChatClient>) -> Self {
        let store = ConversationStore::new(
            config.effective_system_message(),
            config.max_conversations,
        );
        Self {
            config,
            chat,
            registry: ToolRegistry::new(),
            store,
            state: Mutex::new(AgentState::Uninitialized),
            active_turns: AtomicUsize::new(0),
            connections: Mutex::new(Vec::new()),
        }
    }

    /// Returns the agent's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Returns the agent's current state.
    ///
    /// Reports `Dispatching` while a ready agent has turns in flight.
    #[must_use]
    pub fn state(&self) -> AgentState {
        let state = *self.state.lock().expect("state lock poisoned");
        if state == AgentState::Ready && self.active_turns.load(Ordering::SeqCst) > 0 {
            AgentState::Dispatching
        } else {
            state
        }
    }

    /// Returns the number of tools collected from plugins.
    #[must_use]
    pub fn tool_count(&self) -> usize {
        self.registry.len()
    }

    /// Connects to the configured plugin servers and collects their tools.
    ///
    /// Idempotent. A server that cannot be reached, or a tool that cannot
    /// be adapted, is logged and skipped; initialization itself only fails
    /// on a closed agent.
    ///
    /// # Errors
    ///
    /// Returns an invalid state error on a closed agent.
    pub async fn initialize(&self) -> Result<(), AgentError> {
        {
            let mut state = self.state.lock().expect("state lock poisoned");
            match *state {
                AgentState::Closed => {
                    return Err(AgentError::invalid_state(*state, "initialize")
                        .for_agent(&self.config.name));
                }
                AgentState::Uninitialized => *state = AgentState::PluginsInitializing,
                _ => return Ok(()),
            }
        }

        for url in &self.config.mcp_urls {
            let connection =
                match McpConnection::connect(url, self.config.connect_timeout).await {
                    Ok(connection) => Arc::new(connection),
                    Err(e) => {
                        tracing::warn!(%url, error = %e, "Skipping unavailable plugin server");
                        continue;
                    }
                };

            let tools = match connection.list_tools().await {
                Ok(tools) => tools,
                Err(e) => {
                    tracing::warn!(%url, error = %e, "Plugin server refused tool listing");
                    connection.close();
                    continue;
                }
            };

            for tool in tools {
                let tool_name = tool.name.clone();
                let binding = match plugin_binding(connection.clone(), tool) {
                    Ok(binding) => binding,
                    Err(e) => {
                        tracing::warn!(%url, %tool_name, error = %e, "Skipping unusable plugin tool");
                        continue;
                    }
                };
                if let Err(e) = self.registry.register(binding) {
                    tracing::warn!(%url, %tool_name, error = %e, "Skipping conflicting plugin tool");
                }
            }

            self.connections
                .lock()
                .expect("connections lock poisoned")
                .push(connection);
        }

        *self.state.lock().expect("state lock poisoned") = AgentState::Ready;
        tracing::info!(
            agent = %self.config.name,
            tools = self.registry.len(),
            servers = self.connections.lock().expect("connections lock poisoned").len(),
            "Worker agent initialized"
        );
        Ok(())
    }

    /// Processes one user turn in the given conversation context.
    ///
    /// # Errors
    ///
    /// Returns an empty input error before anything else when `input` is
    /// blank, an invalid state error on an uninitialized or closed agent,
    /// and a chat-completion error when the model call fails.
    pub async fn process(
        &self,
        input: &str,
        context_id: &ContextId,
    ) -> Result<String, AgentError> {
        if input.trim().is_empty() {
            return Err(AgentError::empty_input().for_agent(&self.config.name));
        }
        let state = self.state();
        if !state.can_process() {
            return Err(
                AgentError::invalid_state(state, "process a turn").for_agent(&self.config.name)
            );
        }
        let _turn = TurnGuard::enter(&self.active_turns);

        let conversation = self.store.get_or_create(context_id);
        let mut conversation = conversation.lock().await;
        conversation.append(Message::user(input));

        let snapshot = self.registry.snapshot();
        run_turn(
            self.chat.as_ref(),
            &mut conversation,
            &snapshot,
            self.config.max_tool_rounds,
            &self.config.name,
        )
        .await
    }

    /// Returns the transcript for a context, if one exists.
    pub async fn history(&self, context_id: &ContextId) -> Option<Vec<Message>> {
        let conversation = self.store.get(context_id)?;
        let conversation = conversation.lock().await;
        Some(conversation.turns().to_vec())
    }

    /// Closes the agent and releases its plugin connections. Terminal.
    pub fn close(&self) {
        *self.state.lock().expect("state lock poisoned") = AgentState::Closed;
        let connections = std::mem::take(
            &mut *self.connections.lock().expect("connections lock poisoned"),
        );
        for connection in connections {
            connection.close();
        }
        tracing::info!(agent = %self.config.name, "Worker agent closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChatResponse, LlmError};
    use crate::messages::{StopReason, ToolDefinition};
    use async_trait::async_trait;

    #[derive(Debug)]
    struct StaticChat(&'static str);

    #[async_trait]
    impl ChatClient for StaticChat {
        async fn complete(
            &self,
            _messages: &[Message],
            _tools: Option<&[ToolDefinition]>,
        ) -> Result<ChatResponse, LlmError> {
            Ok(ChatResponse {
                content: self.0.to_string(),
                tool_calls: vec![],
                stop_reason: StopReason::EndTurn,
            })
        }

        fn provider_name(&self) -> &'static str {
            "static"
        }
    }

    fn worker() -> WorkerAgent {
        WorkerAgent::new(
            WorkerAgentConfig::new("Weather Agent", "Reports current conditions."),
            Arc::new(StaticChat("sunny")),
        )
    }

    #[tokio::test]
    async fn unreachable_plugin_server_is_not_fatal() {
        let config = WorkerAgentConfig::new("Weather Agent", "Reports current conditions.")
            .with_mcp_url("http://127.0.0.1:1/sse")
            .with_connect_timeout(std::time::Duration::from_secs(1));
        let agent = WorkerAgent::new(config, Arc::new(StaticChat("sunny")));

        agent.initialize().await.unwrap();
        assert_eq!(agent.state(), AgentState::Ready);
        assert_eq!(agent.tool_count(), 0);
    }

    #[tokio::test]
    async fn worker_answers_without_tools() {
        let agent = worker();
        agent.initialize().await.unwrap();
        let ctx = ContextId::parse("session-1").unwrap();
        let answer = agent.process("what's the weather?", &ctx).await.unwrap();
        assert_eq!(answer, "sunny");
    }

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let agent = worker();
        agent.initialize().await.unwrap();
        let ctx = ContextId::parse("session-1").unwrap();
        assert!(agent.process("", &ctx).await.unwrap_err().is_empty_input());
    }

    #[tokio::test]
    async fn close_is_terminal() {
        let agent = worker();
        agent.initialize().await.unwrap();
        agent.close();
        assert!(agent.initialize().await.is_err());
        let ctx = ContextId::parse("session-1").unwrap();
        assert!(agent.process("hello", &ctx).await.is_err());
    }
}

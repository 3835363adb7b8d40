//! The host agent.
//!
//! A host agent owns no capabilities of its own: every remote agent
//! endpoint it is configured with becomes one tool binding, and the model
//! decides per turn which remote agents to consult. Endpoints can be added
//! while the agent is live; in-flight turns keep the tool set they started
//! with.

use crate::agent::config::HostAgentConfig;
use crate::agent::dispatch::run_turn;
use crate::agent::state::{AgentState, TurnGuard};
use crate::conversation::ConversationStore;
use crate::error::AgentError;
use crate::llm::ChatClient;
use crate::messages::Message;
use crate::tools::{remote_binding, ToolRegistry};
use crate::types::ContextId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An orchestrating agent that delegates to remote A2A agents.
#[derive(Debug)]
pub struct HostAgent {
    config: HostAgentConfig,
    chat: Arc<dyn ChatClient>,
    registry: ToolRegistry,
    store: ConversationStore,
    state: Mutex<AgentState>,
    active_turns: AtomicUsize,
}

impl HostAgent {
    /// Creates a host agent from its configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when any endpoint descriptor is
    /// invalid; nothing is contacted over the network here.
    pub fn new(config: HostAgentConfig, chat: Arc<dyn ChatClient>) -> Result<Self, AgentError> {
        for endpoint in &config.endpoints {
            endpoint
                .validate()
                .map_err(|e| e.for_agent(&config.name))?;
        }
        let store = ConversationStore::new(
            config.effective_system_message(),
            config.max_conversations,
        );
        Ok(Self {
            config,
            chat,
            registry: ToolRegistry::new(),
            store,
            state: Mutex::new(AgentState::Uninitialized),
            active_turns: AtomicUsize::new(0),
        })
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

    /// Returns the number of registered delegation tools.
    #[must_use]
    pub fn tool_count(&self) -> usize {
        self.registry.len()
    }

    /// Registers one tool binding per configured endpoint and becomes ready.
    ///
    /// Idempotent: calling this on a ready agent is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an invalid state error on a closed agent, or a registration
    /// error when endpoint function names collide.
    pub fn initialize(&self) -> Result<(), AgentError> {
        {
            let state = self.state.lock().expect("state lock poisoned");
            match *state {
                AgentState::Closed => {
                    return Err(AgentError::invalid_state(*state, "initialize")
                        .for_agent(&self.config.name));
                }
                AgentState::Uninitialized => {}
                _ => return Ok(()),
            }
        }

        for endpoint in &self.config.endpoints {
            let binding = remote_binding(endpoint, self.config.proxy_timeout)
                .map_err(|e| AgentError::tool_registration(e).for_agent(&self.config.name))?;
            self.registry
                .register(binding)
                .map_err(|e| AgentError::tool_registration(e).for_agent(&self.config.name))?;
        }

        *self.state.lock().expect("state lock poisoned") = AgentState::Ready;
        tracing::info!(
            agent = %self.config.name,
            endpoints = self.config.endpoints.len(),
            "Host agent initialized"
        );
        Ok(())
    }

    /// Adds a remote agent endpoint to a live agent.
    ///
    /// Turns that start after this call see the new tool; in-flight turns
    /// keep the set they snapshotted.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid descriptor, or a
    /// registration error when the function name is taken.
    pub fn add_agent_endpoint(&self, endpoint: crate::config::EndpointConfig) -> Result<(), AgentError> {
        if self.state().is_terminal() {
            return Err(AgentError::invalid_state(AgentState::Closed, "add an endpoint")
                .for_agent(&self.config.name));
        }
        endpoint.validate().map_err(|e| e.for_agent(&self.config.name))?;
        let binding = remote_binding(&endpoint, self.config.proxy_timeout)
            .map_err(|e| AgentError::tool_registration(e).for_agent(&self.config.name))?;
        self.registry
            .register(binding)
            .map_err(|e| AgentError::tool_registration(e).for_agent(&self.config.name))?;
        tracing::info!(
            agent = %self.config.name,
            endpoint = %endpoint.name,
            function_name = %endpoint.function_name,
            "Endpoint added"
        );
        Ok(())
    }

    /// Processes one user turn in the given conversation context.
    ///
    /// Turns in the same context run one at a time; turns in different
    /// contexts run concurrently.
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
        self.ensure_processable("process a turn")?;
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

    /// Closes the agent. Terminal; no further turns are accepted.
    pub fn close(&self) {
        *self.state.lock().expect("state lock poisoned") = AgentState::Closed;
        tracing::info!(agent = %self.config.name, "Host agent closed");
    }

    fn ensure_processable(&self, operation: &str) -> Result<(), AgentError> {
        let state = self.state();
        if state.can_process() {
            Ok(())
        } else {
            Err(AgentError::invalid_state(state, operation).for_agent(&self.config.name))
        }
    }
}

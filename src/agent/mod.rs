//! Host and worker agents.
//!
//! Both agent kinds share the same skeleton: a lifecycle state machine, a
//! conversation store, a tool registry, and the dispatch loop that
//! alternates between the model and tool execution. They differ only in
//! where their tools come from; the host delegates to remote A2A agents,
//! the worker serves requests with MCP plugin tools.

mod config;
mod dispatch;
mod host;
mod state;
mod worker;

pub use config::{
    HostAgentConfig, WorkerAgentConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_CONVERSATIONS,
    DEFAULT_MAX_TOOL_ROUNDS,
};
pub use host::HostAgent;
pub use state::AgentState;
pub use worker::WorkerAgent;

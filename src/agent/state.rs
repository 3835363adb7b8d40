//! Agent lifecycle states.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lifecycle state of a host or worker agent.
///
/// Construction leaves the agent `Uninitialized`; `initialize` moves it to
/// `Ready` (through `PluginsInitializing` for a worker agent); `close` is
/// terminal. The agent stores only the lifecycle states; `Dispatching` is
/// reported by `state()` while one or more turns are in flight, since
/// turns in different contexts run concurrently on a ready agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentState {
    /// Constructed but not yet initialized
    #[default]
    Uninitialized,
    /// Connecting to plugin servers and collecting their tools
    PluginsInitializing,
    /// Initialized and able to process turns
    Ready,
    /// At least one turn's dispatch loop is running
    Dispatching,
    /// Closed; no further operations are allowed
    Closed,
}

impl AgentState {
    /// Returns true if the agent can accept a new turn.
    ///
    /// A dispatching agent can: turns in different contexts run
    /// concurrently.
    #[must_use]
    pub fn can_process(&self) -> bool {
        matches!(self, Self::Ready | Self::Dispatching)
    }

    /// Returns true if this is the terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Counts a turn as in flight for the guard's lifetime.
///
/// Agents hold one of these across `run_turn` so `state()` can report
/// `Dispatching` while any turn is running. Dropping the guard (on any
/// exit path) decrements the count.
pub(crate) struct TurnGuard<'a> {
    active_turns: &'a AtomicUsize,
}

impl<'a> TurnGuard<'a> {
    pub(crate) fn enter(active_turns: &'a AtomicUsize) -> Self {
        active_turns.fetch_add(1, Ordering::SeqCst);
        Self { active_turns }
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        self.active_turns.fetch_sub(1, Ordering::SeqCst);
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::PluginsInitializing => "initializing plugins",
            Self::Ready => "ready",
            Self::Dispatching => "dispatching",
            Self::Closed => "closed",
        };
        write!(f, "{name}")
    }
}

//! MCP plugin connection error types.

use std::fmt;
use std::time::Duration;

/// Errors that can occur on an MCP plugin connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpError {
    /// The specific error that occurred
    pub kind: McpErrorKind,
}

/// Specific MCP error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum McpErrorKind {
    /// The SSE stream could not be opened or the handshake failed
    Handshake {
        /// The plugin URL that failed
        url: String,
        /// Description of the failure
        reason: String,
    },
    /// Network error on an established connection
    Transport {
        /// Description of the network error
        message: String,
    },
    /// The server sent a message that does not fit the protocol
    Protocol {
        /// Description of the violation
        message: String,
    },
    /// The server answered a request with a JSON-RPC error
    Rpc {
        /// JSON-RPC error code, when present
        code: Option<i64>,
        /// Error message from the server
        message: String,
    },
    /// No response arrived within the timeout budget
    Timeout {
        /// The timeout budget that was exceeded
        duration: Duration,
    },
    /// The connection has been closed
    Closed,
}

impl McpError {
    /// Creates a new McpError with the given kind.
    #[must_use]
    pub fn new(kind: McpErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a handshake error.
    #[must_use]
    pub fn handshake(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(McpErrorKind::Handshake {
            url: url.into(),
            reason: reason.into(),
        })
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(McpErrorKind::Transport {
            message: message.into(),
        })
    }

    /// Creates a protocol violation error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(McpErrorKind::Protocol {
            message: message.into(),
        })
    }

    /// Creates a JSON-RPC error.
    #[must_use]
    pub fn rpc(code: Option<i64>, message: impl Into<String>) -> Self {
        Self::new(McpErrorKind::Rpc {
            code,
            message: message.into(),
        })
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(duration: Duration) -> Self {
        Self::new(McpErrorKind::Timeout { duration })
    }

    /// Creates a closed connection error.
    #[must_use]
    pub fn closed() -> Self {
        Self::new(McpErrorKind::Closed)
    }
}

impl fmt::Display for McpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            McpErrorKind::Handshake { url, reason } => {
                write!(f, "handshake with '{url}' failed: {reason}")
            }
            McpErrorKind::Transport { message } => write!(f, "transport error: {message}"),
            McpErrorKind::Protocol { message } => write!(f, "protocol violation: {message}"),
            McpErrorKind::Rpc { code, message } => match code {
                Some(code) => write!(f, "server error {code}: {message}"),
                None => write!(f, "server error: {message}"),
            },
            McpErrorKind::Timeout { duration } => {
                write!(f, "no response within {}s", duration.as_secs())
            }
            McpErrorKind::Closed => write!(f, "connection is closed"),
        }
    }
}

impl std::error::Error for McpError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_display_names_the_url() {
        let err = McpError::handshake("http://localhost:9000/sse", "connection refused");
        assert!(err.to_string().contains("http://localhost:9000/sse"));
    }

    #[test]
    fn rpc_display_with_and_without_code() {
        assert!(McpError::rpc(Some(-32601), "method not found")
            .to_string()
            .contains("-32601"));
        assert!(McpError::rpc(None, "boom").to_string().contains("boom"));
    }
}

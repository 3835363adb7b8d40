//! A2A client error types.
//!
//! These errors describe transport-level failures of one remote agent call.
//! They never cross the proxy boundary: `RemoteAgentProxy` translates every
//! variant into a descriptive string for the calling model.

use std::fmt;
use std::time::Duration;

/// Errors that can occur in the A2A client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A2aError {
    /// The specific error that occurred
    pub kind: A2aErrorKind,
}

/// Specific A2A client error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum A2aErrorKind {
    /// Network error when communicating with the remote agent
    Network {
        /// Description of the network error
        message: String,
    },
    /// The call exceeded the configured timeout
    Timeout {
        /// The timeout budget that was exceeded
        duration: Duration,
    },
    /// The remote agent returned a non-success HTTP status
    Http {
        /// HTTP status code
        status_code: u16,
        /// Response body or status text
        message: String,
    },
    /// The response body could not be decoded
    Decode {
        /// Description of the decoding failure
        message: String,
    },
    /// The endpoint URL is not usable
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Why it was rejected
        reason: String,
    },
}

impl A2aError {
    /// Creates a new A2aError with the given kind.
    #[must_use]
    pub fn new(kind: A2aErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(A2aErrorKind::Network {
            message: message.into(),
        })
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(duration: Duration) -> Self {
        Self::new(A2aErrorKind::Timeout { duration })
    }

    /// Creates an HTTP status error.
    #[must_use]
    pub fn http(status_code: u16, message: impl Into<String>) -> Self {
        Self::new(A2aErrorKind::Http {
            status_code,
            message: message.into(),
        })
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(A2aErrorKind::Decode {
            message: message.into(),
        })
    }

    /// Creates an invalid URL error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(A2aErrorKind::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        })
    }

    /// Returns true if this error is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, A2aErrorKind::Timeout { .. })
    }
}

impl fmt::Display for A2aError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            A2aErrorKind::Network { message } => write!(f, "network error: {message}"),
            A2aErrorKind::Timeout { duration } => {
                write!(f, "timed out after {}s", duration.as_secs())
            }
            A2aErrorKind::Http {
                status_code,
                message,
            } => write!(f, "HTTP {status_code}: {message}"),
            A2aErrorKind::Decode { message } => write!(f, "decode error: {message}"),
            A2aErrorKind::InvalidUrl { url, reason } => {
                write!(f, "invalid endpoint URL '{url}': {reason}")
            }
        }
    }
}

impl std::error::Error for A2aError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_distinguishable() {
        assert!(A2aError::timeout(Duration::from_secs(30)).is_timeout());
        assert!(!A2aError::network("refused").is_timeout());
    }

    #[test]
    fn display_includes_detail() {
        let err = A2aError::http(502, "bad gateway");
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("bad gateway"));
    }
}

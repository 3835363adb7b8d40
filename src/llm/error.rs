//! Chat-completion error types.
//!
//! Custom error types for chat-completion operations including network
//! errors, API errors, and response parsing failures.

use std::fmt;
use std::time::Duration;

/// Errors that can occur in a chat-completion client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmError {
    /// The specific error that occurred
    pub kind: LlmErrorKind,
}

/// Specific chat-completion error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Network error when communicating with the API
    Network {
        /// Description of the network error
        message: String,
    },
    /// API returned an error response
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },
    /// Authentication failed
    AuthenticationFailed {
        /// Reason for authentication failure
        reason: String,
    },
    /// Rate limit exceeded
    RateLimited {
        /// Time to wait before retrying
        retry_after: Duration,
    },
    /// Response body could not be parsed
    ParseError {
        /// Description of the parse error
        message: String,
    },
    /// Request timeout
    Timeout {
        /// The timeout duration that was exceeded
        duration: Duration,
    },
    /// Configuration error
    InvalidConfig {
        /// The configuration field that was invalid
        field: String,
        /// Why it was invalid
        reason: String,
    },
}

impl LlmError {
    /// Creates a new LlmError with the given kind.
    #[must_use]
    pub fn new(kind: LlmErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Network {
            message: message.into(),
        })
    }

    /// Creates an API error.
    #[must_use]
    pub fn api_error(status_code: u16, message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::ApiError {
            status_code,
            message: message.into(),
        })
    }

    /// Creates an authentication failed error.
    #[must_use]
    pub fn authentication_failed(reason: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::AuthenticationFailed {
            reason: reason.into(),
        })
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(retry_after: Duration) -> Self {
        Self::new(LlmErrorKind::RateLimited { retry_after })
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::ParseError {
            message: message.into(),
        })
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(duration: Duration) -> Self {
        Self::new(LlmErrorKind::Timeout { duration })
    }

    /// Creates an invalid config error.
    #[must_use]
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Returns true if this error is retriable by the caller.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            LlmErrorKind::Network { .. }
                | LlmErrorKind::RateLimited { .. }
                | LlmErrorKind::Timeout { .. }
                | LlmErrorKind::ApiError {
                    status_code: 500..=599,
                    ..
                }
        )
    }
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LlmErrorKind::Network { message } => {
                write!(f, "network error: {message}")
            }
            LlmErrorKind::ApiError {
                status_code,
                message,
            } => {
                write!(f, "API error (HTTP {status_code}): {message}")
            }
            LlmErrorKind::AuthenticationFailed { reason } => {
                write!(f, "authentication failed: {reason}; check the API key")
            }
            LlmErrorKind::RateLimited { retry_after } => {
                write!(f, "rate limited; retry after {}s", retry_after.as_secs())
            }
            LlmErrorKind::ParseError { message } => {
                write!(f, "failed to parse response: {message}")
            }
            LlmErrorKind::Timeout { duration } => {
                write!(f, "request timed out after {}s", duration.as_secs())
            }
            LlmErrorKind::InvalidConfig { field, reason } => {
                write!(f, "invalid configuration for '{field}': {reason}")
            }
        }
    }
}

impl std::error::Error for LlmError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_are_retriable() {
        assert!(LlmError::network("connection refused").is_retriable());
    }

    #[test]
    fn server_errors_are_retriable_client_errors_are_not() {
        assert!(LlmError::api_error(503, "overloaded").is_retriable());
        assert!(!LlmError::api_error(400, "bad request").is_retriable());
    }

    #[test]
    fn auth_failure_is_not_retriable() {
        assert!(!LlmError::authentication_failed("bad key").is_retriable());
    }

    #[test]
    fn display_includes_status_code() {
        let err = LlmError::api_error(429, "slow down");
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn timeout_display_includes_duration() {
        let err = LlmError::timeout(Duration::from_secs(30));
        assert!(err.to_string().contains("30"));
    }
}

//! Request identifier type using TypeID format.
//!
//! RequestId identifies one outbound A2A request envelope.
//! Format: `req_01h455vb4pex5vsknk084sn02q`

use mti::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated request identifier.
///
/// Uses TypeID format for human-readable, time-sortable, globally unique IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(MagicTypeId);

/// Error returned when attempting to create an invalid request ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidRequestId {
    /// TypeID parsing failed
    Parse(String),
    /// Wrong prefix (expected "req")
    WrongPrefix {
        /// The expected prefix
        expected: &'static str,
        /// The actual prefix found
        actual: String,
    },
}

impl fmt::Display for InvalidRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid request ID: {e}"),
            Self::WrongPrefix { expected, actual } => {
                write!(f, "expected prefix '{expected}', got '{actual}'")
            }
        }
    }
}

impl std::error::Error for InvalidRequestId {}

impl RequestId {
    /// The TypeID prefix for request identifiers.
    pub const PREFIX: &'static str = "req";

    /// Creates a new request ID with a fresh UUIDv7 (time-sortable).
    #[must_use]
    pub fn new() -> Self {
        Self(Self::PREFIX.create_type_id::<V7>())
    }

    /// Parses a request ID from a string, validating the prefix.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequestId::Parse` if the string is not a valid TypeID.
    /// Returns `InvalidRequestId::WrongPrefix` on a different prefix.
    pub fn parse(s: &str) -> Result<Self, InvalidRequestId> {
        let id = MagicTypeId::from_str(s).map_err(|e| InvalidRequestId::Parse(e.to_string()))?;

        let prefix = id.prefix().as_str();
        if prefix != Self::PREFIX {
            return Err(InvalidRequestId::WrongPrefix {
                expected: Self::PREFIX,
                actual: prefix.to_string(),
            });
        }

        Ok(Self(id))
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RequestId {
    type Err = InvalidRequestId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RequestId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RequestId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_valid_request_id() {
        let id = RequestId::new();
        assert!(id.to_string().starts_with("req_"));
    }

    #[test]
    fn parse_roundtrip() {
        let id = RequestId::new();
        assert_eq!(RequestId::parse(&id.to_string()), Ok(id));
    }

    #[test]
    fn parse_wrong_prefix_fails() {
        let other = "msg".create_type_id::<V7>().to_string();
        assert!(matches!(
            RequestId::parse(&other),
            Err(InvalidRequestId::WrongPrefix { expected: "req", .. })
        ));
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }
}

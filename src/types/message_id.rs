//! Message identifier type using TypeID format.
//!
//! MessageId identifies one message inside an A2A request envelope.
//! Format: `msg_01h455vb4pex5vsknk084sn02q`

use mti::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated message identifier.
///
/// Uses TypeID format for human-readable, time-sortable, globally unique IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(MagicTypeId);

/// Error returned when attempting to create an invalid message ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMessageId {
    /// TypeID parsing failed
    Parse(String),
    /// Wrong prefix (expected "msg")
    WrongPrefix {
        /// The expected prefix
        expected: &'static str,
        /// The actual prefix found
        actual: String,
    },
}

impl fmt::Display for InvalidMessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid message ID: {e}"),
            Self::WrongPrefix { expected, actual } => {
                write!(f, "expected prefix '{expected}', got '{actual}'")
            }
        }
    }
}

impl std::error::Error for InvalidMessageId {}

impl MessageId {
    /// The TypeID prefix for message identifiers.
    pub const PREFIX: &'static str = "msg";

    /// Creates a new message ID with a fresh UUIDv7 (time-sortable).
    #[must_use]
    pub fn new() -> Self {
        Self(Self::PREFIX.create_type_id::<V7>())
    }

    /// Parses a message ID from a string, validating the prefix.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMessageId::Parse` if the string is not a valid TypeID.
    /// Returns `InvalidMessageId::WrongPrefix` on a different prefix.
    pub fn parse(s: &str) -> Result<Self, InvalidMessageId> {
        let id = MagicTypeId::from_str(s).map_err(|e| InvalidMessageId::Parse(e.to_string()))?;

        let prefix = id.prefix().as_str();
        if prefix != Self::PREFIX {
            return Err(InvalidMessageId::WrongPrefix {
                expected: Self::PREFIX,
                actual: prefix.to_string(),
            });
        }

        Ok(Self(id))
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MessageId {
    type Err = InvalidMessageId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MessageId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MessageId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

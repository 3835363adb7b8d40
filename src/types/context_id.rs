//! Context identifier type.
//!
//! A `ContextId` partitions conversation history: every turn processed under
//! the same context id shares one conversation, and different context ids
//! never share state. The value is caller-supplied and opaque; the only
//! structural requirement is that it is non-empty.

use mti::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated, caller-supplied context identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextId(String);

/// Error returned when attempting to create an invalid context ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidContextId {
    /// The supplied string was empty
    Empty,
}

impl fmt::Display for InvalidContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "context ID cannot be empty"),
        }
    }
}

impl std::error::Error for InvalidContextId {}

impl ContextId {
    /// Parses a context ID from a caller-supplied string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidContextId::Empty` if the string is empty.
    pub fn parse(s: impl Into<String>) -> Result<Self, InvalidContextId> {
        let s = s.into();
        if s.is_empty() {
            return Err(InvalidContextId::Empty);
        }
        Ok(Self(s))
    }

    /// Generates a fresh context ID in TypeID format (`ctx_…`).
    ///
    /// Used for the per-call context the remote agent proxy sends downstream;
    /// caller-facing context ids are always supplied, never generated.
    #[must_use]
    pub fn generate() -> Self {
        Self("ctx".create_type_id::<V7>().to_string())
    }

    /// Returns the context ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContextId {
    type Err = InvalidContextId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ContextId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ContextId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ContextId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}

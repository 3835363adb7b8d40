//! Validated function names.
//!
//! A function name is the identifier a tool is registered under and the
//! name the model sees in its function-calling interface. It must be a
//! valid callable identifier: `[A-Za-z_][A-Za-z0-9_]*`.

use crate::tools::error::ToolError;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static pattern"))
}

fn invalid_chars_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9A-Za-z_]").expect("static pattern"))
}

/// A validated callable identifier for a tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionName(String);

impl FunctionName {
    /// Parses a function name, rejecting invalid identifiers.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::invalid_name` if the string is empty or contains
    /// characters outside `[A-Za-z0-9_]`, or starts with a digit.
    pub fn parse(s: impl Into<String>) -> Result<Self, ToolError> {
        let s = s.into();
        if s.is_empty() {
            return Err(ToolError::invalid_name(s, "must not be empty"));
        }
        if !identifier_re().is_match(&s) {
            return Err(ToolError::invalid_name(
                s,
                "must match [A-Za-z_][A-Za-z0-9_]*",
            ));
        }
        Ok(Self(s))
    }

    /// Derives a valid function name from a free-form display name.
    ///
    /// Invalid characters become underscores and a leading digit gets an
    /// underscore prefix, so "Order Agent 2" becomes "Order_Agent_2".
    ///
    /// # Errors
    ///
    /// Returns `ToolError::invalid_name` if nothing usable remains.
    pub fn sanitize(display_name: &str) -> Result<Self, ToolError> {
        let mut cleaned = invalid_chars_re()
            .replace_all(display_name, "_")
            .into_owned();
        if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
            cleaned.insert(0, '_');
        }
        if cleaned.chars().all(|c| c == '_') {
            return Err(ToolError::invalid_name(
                display_name,
                "no usable identifier characters",
            ));
        }
        Self::parse(cleaned)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FunctionName {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for FunctionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for FunctionName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FunctionName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_valid_identifiers() {
        assert!(FunctionName::parse("check_order_status").is_ok());
        assert!(FunctionName::parse("_private").is_ok());
        assert!(FunctionName::parse("v2_lookup").is_ok());
    }

    #[test]
    fn parse_rejects_invalid_identifiers() {
        assert!(FunctionName::parse("").is_err());
        assert!(FunctionName::parse("2fast").is_err());
        assert!(FunctionName::parse("order status").is_err());
        assert!(FunctionName::parse("order-status").is_err());
    }

    #[test]
    fn sanitize_replaces_invalid_chars() {
        let name = FunctionName::sanitize("Order Agent").unwrap();
        assert_eq!(name.as_str(), "Order_Agent");
    }

    #[test]
    fn sanitize_prefixes_leading_digit() {
        let name = FunctionName::sanitize("2nd Agent").unwrap();
        assert_eq!(name.as_str(), "_2nd_Agent");
    }

    #[test]
    fn sanitize_rejects_nothing_usable() {
        assert!(FunctionName::sanitize("!!!").is_err());
        assert!(FunctionName::sanitize("").is_err());
    }

    #[test]
    fn serialization_roundtrip() {
        let name = FunctionName::parse("check_order_status").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        let back: FunctionName = serde_json::from_str(&json).unwrap();
        assert_eq!(name, back);
    }

    #[test]
    fn deserialization_rejects_invalid() {
        assert!(serde_json::from_str::<FunctionName>("\"not valid\"").is_err());
    }
}

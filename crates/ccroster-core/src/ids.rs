//! Opaque Identifiers
//!
//! Group and user identifiers handed out by the membership service. The
//! service emits them as JSON numbers, while locally persisted state may hold
//! them as strings, so both forms deserialize into the same newtype.
//!
//! # Example
//!
//! ```
//! use ccroster_core::GroupId;
//!
//! let from_number: GroupId = serde_json::from_str("4503599627370496").unwrap();
//! let from_text: GroupId = serde_json::from_str("\"4503599627370496\"").unwrap();
//! assert_eq!(from_number, from_text);
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Wire representation of an identifier: either a number or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

/// Macro to define an opaque identifier type
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from its textual form.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }
    };
}

define_id!(
    /// Identifier of a call center (routing group).
    GroupId
);

define_id!(
    /// Identifier of the operator whose memberships are reconciled.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_id_from_number_and_string() {
        let a: GroupId = serde_json::from_str("42").unwrap();
        let b: GroupId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "42");
    }

    #[test]
    fn test_group_id_serializes_as_string() {
        let id = GroupId::from(7u64);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
    }

    #[test]
    fn test_user_id_parse_trims() {
        let id: UserId = " 123 ".parse().unwrap();
        assert_eq!(id.to_string(), "123");
    }

    #[test]
    fn test_group_id_rejects_objects() {
        let result: Result<GroupId, _> = serde_json::from_str("{\"id\": 1}");
        assert!(result.is_err());
    }
}

//! Typed ID wrappers for domain entities.

use crate::RecallError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Opaque owner identifier, as supplied by the upstream identity layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Parses a user ID, rejecting blank values.
    ///
    /// Any other value is kept exactly as sent: `"u1 "` and `"u1"` are
    /// distinct owners with distinct cache keys.
    pub fn parse(s: &str) -> Result<Self, RecallError> {
        if s.trim().is_empty() {
            return Err(RecallError::validation("user id is required"));
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wraps a raw store identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw store identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }

            /// Parses an identifier from a path segment or cache field name.
            pub fn parse(s: &str) -> Result<Self, RecallError> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| RecallError::validation(format!("Invalid {}: {}", $label, s)))
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

numeric_id!(
    /// Store-assigned category identifier.
    CategoryId,
    "category id"
);

numeric_id!(
    /// Store-assigned flashcard identifier.
    FlashcardId,
    "flashcard id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parse_keeps_value_as_sent() {
        let padded = UserId::parse("u1 ").unwrap();
        assert_eq!(padded.as_str(), "u1 ");
        assert_eq!(padded.to_string(), "u1 ");
        assert_ne!(padded, UserId::parse("u1").unwrap());
    }

    #[test]
    fn test_user_id_rejects_blank() {
        assert!(matches!(UserId::parse(""), Err(RecallError::Validation(_))));
        assert!(matches!(UserId::parse("   "), Err(RecallError::Validation(_))));
    }

    #[test]
    fn test_numeric_id_parse() {
        assert_eq!(CategoryId::parse("42").unwrap(), CategoryId::new(42));
        assert_eq!(FlashcardId::parse("7").unwrap().value(), 7);
        assert!(CategoryId::parse("abc").is_err());
        assert!(FlashcardId::parse("").is_err());
    }

    #[test]
    fn test_numeric_id_serializes_transparently() {
        let json = serde_json::to_string(&CategoryId::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}

//! Strongly-typed ID wrappers for objects and actors
//!
//! Ids are opaque strings: callers may supply their own (e.g. a database key)
//! or generate a fresh UUID. The newtypes keep object ids and actor ids from
//! being mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate string-backed ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a caller-supplied identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Create a new random ID (UUID v4)
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrow the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check whether the identifier is empty
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ObjectId);
define_id!(ActorId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ObjectId::generate();
        let b = ObjectId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_caller_supplied_id() {
        let id = ObjectId::new("contact-42");
        assert_eq!(id.as_str(), "contact-42");
        assert_eq!(id.to_string(), "contact-42");
        assert_eq!(id, ObjectId::from("contact-42"));
    }

    #[test]
    fn test_serialization_is_transparent() {
        let id = ActorId::from("alice");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"alice\"");
        let back: ActorId = serde_json::from_str("\"alice\"").unwrap();
        assert_eq!(back, id);
    }
}

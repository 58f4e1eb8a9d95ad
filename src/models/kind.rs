//! Object kind tag
//!
//! A closed set of known kinds with an escape hatch for kinds this crate does
//! not know about yet. Serialized as a plain lowercase string so new kinds need
//! no migration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag of a [`BaseObject`](super::BaseObject)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectKind {
    User,
    Record,
    Task,
    Event,
    Message,
    Activity,
    Notification,
    /// Any kind not listed above, lowercased. Build it with
    /// [`ObjectKind::parse`] so known names never land here.
    Other(String),
}

impl ObjectKind {
    /// The string tag for this kind
    pub fn as_str(&self) -> &str {
        match self {
            ObjectKind::User => "user",
            ObjectKind::Record => "record",
            ObjectKind::Task => "task",
            ObjectKind::Event => "event",
            ObjectKind::Message => "message",
            ObjectKind::Activity => "activity",
            ObjectKind::Notification => "notification",
            ObjectKind::Other(s) => s.as_str(),
        }
    }

    /// Parse a kind from a string (case-insensitive)
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "user" => ObjectKind::User,
            "record" => ObjectKind::Record,
            "task" => ObjectKind::Task,
            "event" => ObjectKind::Event,
            "message" => ObjectKind::Message,
            "activity" => ObjectKind::Activity,
            "notification" => ObjectKind::Notification,
            other => ObjectKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ObjectKind {
    fn from(s: String) -> Self {
        ObjectKind::parse(&s)
    }
}

impl From<&str> for ObjectKind {
    fn from(s: &str) -> Self {
        ObjectKind::parse(s)
    }
}

impl From<ObjectKind> for String {
    fn from(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

//! Typed views over the open `fields` document
//!
//! Each kind that has a known shape gets a serde struct implementing
//! [`KindFields`]. Unknown keys in the document are ignored on decode, so
//! older readers keep working when a kind grows new fields.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::kind::ObjectKind;

/// A typed view of the fields of one object kind
pub trait KindFields: Serialize + DeserializeOwned {
    /// The kind of object these fields belong to
    fn kind() -> ObjectKind;
}

/// Task lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Cancelled => "cancelled",
        }
    }
}

/// Fields of a `task` object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskFields {
    pub title: String,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TaskFields {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: TaskStatus::default(),
            due_date: None,
            description: None,
        }
    }
}

impl KindFields for TaskFields {
    fn kind() -> ObjectKind {
        ObjectKind::Task
    }
}

/// Fields of a `record` object (a contact or company card)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFields {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl KindFields for RecordFields {
    fn kind() -> ObjectKind {
        ObjectKind::Record
    }
}

/// Fields of a `user` object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserFields {
    pub display_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl KindFields for UserFields {
    fn kind() -> ObjectKind {
        ObjectKind::User
    }
}

//! Activity objects
//!
//! An activity is a `BaseObject` of kind `activity` whose fields describe one
//! lifecycle event of another object. Activities are write-once: this type
//! offers no mutators and the generator only ever creates them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::diff::Changes;
use crate::error::{ObjtrailError, ObjtrailResult};
use crate::models::{ActorId, BaseObject, KindFields, ObjectId, ObjectKind};

/// Metadata key holding the change map of an `updated` activity
pub const CHANGES_KEY: &str = "changes";

/// Category of lifecycle event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Created,
    Updated,
    Deleted,
    Viewed,
    Shared,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Created => "created",
            Verb::Updated => "updated",
            Verb::Deleted => "deleted",
            Verb::Viewed => "viewed",
            Verb::Shared => "shared",
        }
    }

    /// Parse a verb from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "created" | "create" => Some(Verb::Created),
            "updated" | "update" => Some(Verb::Updated),
            "deleted" | "delete" => Some(Verb::Deleted),
            "viewed" | "view" => Some(Verb::Viewed),
            "shared" | "share" => Some(Verb::Shared),
            _ => None,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view of an activity's fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFields {
    pub actor_id: ActorId,
    pub verb: Verb,
    pub object_id: ObjectId,
    pub object_kind: ObjectKind,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl KindFields for ActivityFields {
    fn kind() -> ObjectKind {
        ObjectKind::Activity
    }
}

/// One immutable audit-trail entry
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityObject {
    object: BaseObject,
    activity: ActivityFields,
}

impl ActivityObject {
    /// Build a new activity owned by `actor_id`
    pub fn new(
        actor_id: impl Into<ActorId>,
        verb: Verb,
        object_id: ObjectId,
        object_kind: ObjectKind,
        metadata: Map<String, Value>,
    ) -> ObjtrailResult<Self> {
        let activity = ActivityFields {
            actor_id: actor_id.into(),
            verb,
            object_id,
            object_kind,
            metadata,
        };
        let mut object = BaseObject::new(ObjectKind::Activity, activity.actor_id.clone());
        object.set_typed_fields(&activity)?;
        Ok(Self { object, activity })
    }

    /// Decode a stored object as an activity
    pub fn from_object(object: BaseObject) -> ObjtrailResult<Self> {
        let activity = object.typed_fields::<ActivityFields>()?;
        Ok(Self { object, activity })
    }

    /// Set the time the event is recorded at (defaults to construction time)
    #[must_use]
    pub fn recorded_at(mut self, at: DateTime<Utc>) -> Self {
        self.object.created_at = at;
        self.object.updated_at = at;
        self
    }

    pub fn id(&self) -> &ObjectId {
        self.object.id()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.object.created_at
    }

    pub fn actor_id(&self) -> &ActorId {
        &self.activity.actor_id
    }

    pub fn verb(&self) -> Verb {
        self.activity.verb
    }

    pub fn object_id(&self) -> &ObjectId {
        &self.activity.object_id
    }

    pub fn object_kind(&self) -> &ObjectKind {
        &self.activity.object_kind
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.activity.metadata
    }

    /// The change map of an `updated` activity; empty for other verbs
    pub fn changes(&self) -> ObjtrailResult<Changes> {
        match self.activity.metadata.get(CHANGES_KEY) {
            None => Ok(Changes::new()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                ObjtrailError::Decode(format!("changes of activity {}: {}", self.id(), e))
            }),
        }
    }

    /// The underlying stored object
    pub fn as_object(&self) -> &BaseObject {
        &self.object
    }

    pub fn into_object(self) -> BaseObject {
        self.object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::diff::FieldChange;
    use crate::models::AclEntry;
    use serde_json::json;

    fn created(actor: &str) -> ActivityObject {
        ActivityObject::new(
            actor,
            Verb::Created,
            ObjectId::from("task-1"),
            ObjectKind::Task,
            Map::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_verb_display_and_parse() {
        for verb in [
            Verb::Created,
            Verb::Updated,
            Verb::Deleted,
            Verb::Viewed,
            Verb::Shared,
        ] {
            assert_eq!(Verb::parse(&verb.to_string()), Some(verb));
        }
        assert_eq!(Verb::parse("Update"), Some(Verb::Updated));
        assert_eq!(Verb::parse("liked"), None);
    }

    #[test]
    fn test_new_activity_envelope() {
        let activity = created("alice");
        let object = activity.as_object();

        assert_eq!(object.kind(), &ObjectKind::Activity);
        assert_eq!(object.created_by, ActorId::from("alice"));
        assert_eq!(object.acl, vec![AclEntry::owner("alice")]);
        assert_eq!(object.field("verb"), Some(&json!("created")));
        assert_eq!(object.field("object_kind"), Some(&json!("task")));
        assert_eq!(
            object.fields,
            serde_json::to_value(ActivityFields {
                actor_id: ActorId::from("alice"),
                verb: Verb::Created,
                object_id: ObjectId::from("task-1"),
                object_kind: ObjectKind::Task,
                metadata: Map::new(),
            })
            .unwrap()
        );
    }

    #[test]
    fn test_from_object_round_trip() {
        let activity = created("alice");
        let decoded = ActivityObject::from_object(activity.as_object().clone()).unwrap();
        assert_eq!(decoded, activity);
        assert_eq!(decoded.verb(), Verb::Created);
        assert_eq!(decoded.object_id().as_str(), "task-1");
    }

    #[test]
    fn test_from_object_rejects_bad_fields() {
        let object = BaseObject::new(ObjectKind::Activity, "alice")
            .with_fields(json!({"actor_id": "alice", "verb": "liked"}));
        assert!(ActivityObject::from_object(object).unwrap_err().is_decode());

        let wrong_kind = BaseObject::new(ObjectKind::Task, "alice");
        assert!(ActivityObject::from_object(wrong_kind).unwrap_err().is_decode());
    }

    #[test]
    fn test_changes_from_metadata() {
        let mut metadata = Map::new();
        metadata.insert(
            CHANGES_KEY.into(),
            json!({"title": {"before": "a", "after": "b"}}),
        );
        let activity = ActivityObject::new(
            "alice",
            Verb::Updated,
            ObjectId::from("task-1"),
            ObjectKind::Task,
            metadata,
        )
        .unwrap();

        let changes = activity.changes().unwrap();
        assert_eq!(
            changes["title"],
            FieldChange {
                before: json!("a"),
                after: json!("b"),
            }
        );
        assert!(created("alice").changes().unwrap().is_empty());
    }
}

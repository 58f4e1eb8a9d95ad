//! The generic object envelope
//!
//! Every domain object (contact, task, user, activity...) is stored as a
//! `BaseObject`: a fixed header plus an open `fields` document. Kind-specific
//! structure lives in typed views (see [`fields`](super::fields)) decoded on
//! read, so adding a kind never needs a migration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::fields::KindFields;
use super::ids::{ActorId, ObjectId};
use super::kind::ObjectKind;
use crate::error::{ObjtrailError, ObjtrailResult};

/// Role granted to the creator of an object
pub const ROLE_OWNER: &str = "owner";

/// One access-control entry. Carried as data only, never enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    pub actor_id: ActorId,
    pub role: String,
}

impl AclEntry {
    pub fn new(actor_id: impl Into<ActorId>, role: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            role: role.into(),
        }
    }

    /// An `owner` entry for the given actor
    pub fn owner(actor_id: impl Into<ActorId>) -> Self {
        Self::new(actor_id, ROLE_OWNER)
    }
}

/// Generic entity envelope
///
/// `id` and `kind` are fixed at construction and only readable afterwards.
/// Constructors and [`touch`](Self::touch) keep `created_at <= updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseObject {
    id: ObjectId,
    kind: ObjectKind,

    /// When the object was created (UTC)
    pub created_at: DateTime<Utc>,

    /// When the object was last modified (UTC)
    pub updated_at: DateTime<Utc>,

    /// Actor who created the object
    pub created_by: ActorId,

    /// Ordered access-control list
    #[serde(default)]
    pub acl: Vec<AclEntry>,

    /// Free-form labels; order is kept for display only
    #[serde(default)]
    pub tags: Vec<String>,

    /// Kind-specific document
    #[serde(default)]
    pub fields: Value,
}

impl BaseObject {
    /// Create an object with a generated id and an empty fields document
    pub fn new(kind: ObjectKind, created_by: impl Into<ActorId>) -> Self {
        Self::with_id(ObjectId::generate(), kind, created_by)
    }

    /// Create an object with a caller-supplied id
    pub fn with_id(
        id: impl Into<ObjectId>,
        kind: ObjectKind,
        created_by: impl Into<ActorId>,
    ) -> Self {
        let now = Utc::now();
        let created_by = created_by.into();
        Self {
            id: id.into(),
            kind,
            created_at: now,
            updated_at: now,
            acl: vec![AclEntry::owner(created_by.clone())],
            created_by,
            tags: Vec::new(),
            fields: Value::Object(Map::new()),
        }
    }

    /// Create an object whose kind and fields come from a typed view
    pub fn from_typed<T: KindFields>(
        id: impl Into<ObjectId>,
        created_by: impl Into<ActorId>,
        fields: &T,
    ) -> ObjtrailResult<Self> {
        let mut object = Self::with_id(id, T::kind(), created_by);
        object.set_typed_fields(fields)?;
        Ok(object)
    }

    /// Replace the fields document
    pub fn with_fields(mut self, fields: Value) -> Self {
        self.fields = fields;
        self
    }

    /// Replace the tag list
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the access-control list
    pub fn with_acl(mut self, acl: Vec<AclEntry>) -> Self {
        self.acl = acl;
        self
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Look up a top-level field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.as_object().and_then(|map| map.get(key))
    }

    /// Set a top-level field, turning a non-object document into an object
    pub fn set_field(&mut self, key: impl Into<String>, value: Value) {
        if !self.fields.is_object() {
            self.fields = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.fields {
            map.insert(key.into(), value);
        }
    }

    /// Remove a top-level field, returning its previous value
    pub fn remove_field(&mut self, key: &str) -> Option<Value> {
        self.fields.as_object_mut().and_then(|map| map.remove(key))
    }

    /// Decode the fields document into a typed view
    ///
    /// Fails with `Decode` if the object is of another kind or the document
    /// does not have the expected shape.
    pub fn typed_fields<T: KindFields>(&self) -> ObjtrailResult<T> {
        let expected = T::kind();
        if self.kind != expected {
            return Err(ObjtrailError::Decode(format!(
                "object {} is a {}, not a {}",
                self.id, self.kind, expected
            )));
        }
        serde_json::from_value(self.fields.clone()).map_err(|e| {
            ObjtrailError::Decode(format!("{} fields of {}: {}", self.kind, self.id, e))
        })
    }

    /// Replace the fields document with an encoded typed view
    pub fn set_typed_fields<T: KindFields>(&mut self, fields: &T) -> ObjtrailResult<()> {
        self.fields = serde_json::to_value(fields)?;
        Ok(())
    }

    /// Add a tag if not already present. Returns true if it was added.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove a tag. Returns true if it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Grant a role to an actor, replacing any role it already had
    pub fn grant(&mut self, actor_id: impl Into<ActorId>, role: impl Into<String>) {
        let entry = AclEntry::new(actor_id, role);
        match self.acl.iter_mut().find(|e| e.actor_id == entry.actor_id) {
            Some(existing) => existing.role = entry.role,
            None => self.acl.push(entry),
        }
    }

    /// Mark the object as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}

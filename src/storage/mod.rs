//! Storage layer for objtrail
//!
//! Defines the [`ObjectStore`] contract shared by every backend and provides
//! two implementations: [`MemoryStore`] (in-process, the reference store) and
//! [`JsonFileStore`] (the same table persisted to a JSON document with atomic
//! writes).
//!
//! Every value crossing a store boundary is copied: mutating an object after
//! handing it to `create`/`update`, or mutating an object returned by
//! `get`/`query`, never changes what the store returns later.

pub mod json_file;
pub mod memory;
mod table;

use std::collections::BTreeMap;

use serde_json::Value;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::ObjtrailResult;
use crate::models::{BaseObject, ObjectId, ObjectKind};

/// Storage contract for [`BaseObject`]s
///
/// Implementations must be safe to share between threads: reads may run
/// concurrently, writes are exclusive.
pub trait ObjectStore: Send + Sync {
    /// Store a copy of `object`. Fails with `AlreadyExists` on a duplicate id.
    fn create(&self, object: &BaseObject) -> ObjtrailResult<()>;

    /// Return a copy of the stored object. Fails with `NotFound` if absent.
    fn get(&self, id: &ObjectId) -> ObjtrailResult<BaseObject>;

    /// Replace the stored object with a copy of `object`. Fails with
    /// `NotFound` if its id is absent.
    fn update(&self, object: &BaseObject) -> ObjtrailResult<()>;

    /// Remove an object. Fails with `NotFound` if absent.
    fn delete(&self, id: &ObjectId) -> ObjtrailResult<()>;

    /// All objects of `kind` matching `filters`, in insertion order
    fn query(&self, kind: &ObjectKind, filters: &QueryFilters) -> ObjtrailResult<Vec<BaseObject>>;
}

/// Top-level field equality predicates for [`ObjectStore::query`]
///
/// An empty filter set matches every object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFilters {
    fields: BTreeMap<String, Value>,
}

impl QueryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `fields[key] == value`
    pub fn field_eq(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check whether an object satisfies every predicate
    pub fn matches(&self, object: &BaseObject) -> bool {
        self.fields
            .iter()
            .all(|(key, expected)| object.field(key) == Some(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_filters_match_everything() {
        let obj = BaseObject::new(ObjectKind::Task, "alice").with_fields(json!("not a map"));
        assert!(QueryFilters::new().is_empty());
        assert!(QueryFilters::new().matches(&obj));
    }

    #[test]
    fn test_field_equality() {
        let obj = BaseObject::new(ObjectKind::Task, "alice")
            .with_fields(json!({"status": "done", "title": "Ship"}));

        assert!(QueryFilters::new()
            .field_eq("status", json!("done"))
            .matches(&obj));
        assert!(!QueryFilters::new()
            .field_eq("status", json!("todo"))
            .matches(&obj));
        assert!(!QueryFilters::new()
            .field_eq("missing", json!(null))
            .matches(&obj));
    }
}

//! In-memory object table shared by the store implementations
//!
//! Keeps every object together with the sequence number it was inserted
//! with, so queries can return objects in insertion order. Every value going
//! in or out is cloned.

use std::collections::HashMap;

use crate::error::{ObjtrailError, ObjtrailResult};
use crate::models::{BaseObject, ObjectId, ObjectKind};

use super::QueryFilters;

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    object: BaseObject,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ObjectTable {
    entries: HashMap<ObjectId, Entry>,
    next_seq: u64,
}

impl ObjectTable {
    /// Rebuild a table from objects listed in insertion order
    pub fn from_objects(objects: Vec<BaseObject>) -> ObjtrailResult<Self> {
        let mut table = Self::default();
        for object in &objects {
            table.insert(object)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, object: &BaseObject) -> ObjtrailResult<()> {
        if self.entries.contains_key(object.id()) {
            return Err(ObjtrailError::object_already_exists(object.id().as_str()));
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(
            object.id().clone(),
            Entry {
                seq,
                object: object.clone(),
            },
        );
        Ok(())
    }

    pub fn get(&self, id: &ObjectId) -> ObjtrailResult<BaseObject> {
        self.entries
            .get(id)
            .map(|entry| entry.object.clone())
            .ok_or_else(|| ObjtrailError::object_not_found(id.as_str()))
    }

    /// Replace a stored object, keeping its insertion position
    pub fn replace(&mut self, object: &BaseObject) -> ObjtrailResult<()> {
        let entry = self
            .entries
            .get_mut(object.id())
            .ok_or_else(|| ObjtrailError::object_not_found(object.id().as_str()))?;

        if entry.object.kind() != object.kind() {
            return Err(ObjtrailError::Validation(format!(
                "kind of {} cannot change from {} to {}",
                object.id(),
                entry.object.kind(),
                object.kind()
            )));
        }

        entry.object = object.clone();
        Ok(())
    }

    pub fn remove(&mut self, id: &ObjectId) -> ObjtrailResult<BaseObject> {
        self.entries
            .remove(id)
            .map(|entry| entry.object)
            .ok_or_else(|| ObjtrailError::object_not_found(id.as_str()))
    }

    /// Objects of one kind matching the filters, in insertion order
    pub fn query(&self, kind: &ObjectKind, filters: &QueryFilters) -> Vec<BaseObject> {
        let mut matching: Vec<&Entry> = self
            .entries
            .values()
            .filter(|entry| entry.object.kind() == kind && filters.matches(&entry.object))
            .collect();
        matching.sort_by_key(|entry| entry.seq);
        matching.into_iter().map(|entry| entry.object.clone()).collect()
    }

    /// Every object, in insertion order
    pub fn objects(&self) -> Vec<BaseObject> {
        let mut all: Vec<&Entry> = self.entries.values().collect();
        all.sort_by_key(|entry| entry.seq);
        all.into_iter().map(|entry| entry.object.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task(id: &str) -> BaseObject {
        BaseObject::with_id(id, ObjectKind::Task, "alice")
    }

    #[test]
    fn test_query_returns_insertion_order() {
        let mut table = ObjectTable::default();
        for id in ["c", "a", "b"] {
            table.insert(&task(id)).unwrap();
        }
        let ids: Vec<String> = table
            .query(&ObjectKind::Task, &QueryFilters::new())
            .iter()
            .map(|o| o.id().to_string())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut table = ObjectTable::default();
        table.insert(&task("a")).unwrap();
        table.insert(&task("b")).unwrap();

        let updated = task("a").with_fields(json!({"title": "new"}));
        table.replace(&updated).unwrap();

        let objects = table.objects();
        assert_eq!(objects[0], updated);
        assert_eq!(objects[1].id().as_str(), "b");
    }

    #[test]
    fn test_replace_rejects_kind_change() {
        let mut table = ObjectTable::default();
        table.insert(&task("a")).unwrap();

        let other = BaseObject::with_id("a", ObjectKind::Record, "alice");
        assert!(matches!(
            table.replace(&other),
            Err(ObjtrailError::Validation(_))
        ));
    }

    #[test]
    fn test_from_objects_rejects_duplicates() {
        let err = ObjectTable::from_objects(vec![task("a"), task("a")]).unwrap_err();
        assert!(err.is_already_exists());
    }
}

//! In-process object store
//!
//! A `RwLock`-guarded table: any number of concurrent readers, one writer at a
//! time. Nothing here performs I/O or blocks on anything but the lock.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{ObjtrailError, ObjtrailResult};
use crate::models::{BaseObject, ObjectId, ObjectKind};

use super::table::ObjectTable;
use super::{ObjectStore, QueryFilters};

/// Reference thread-safe [`ObjectStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<ObjectTable>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects
    pub fn len(&self) -> ObjtrailResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> ObjtrailResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> ObjtrailResult<RwLockReadGuard<'_, ObjectTable>> {
        self.table
            .read()
            .map_err(|e| ObjtrailError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> ObjtrailResult<RwLockWriteGuard<'_, ObjectTable>> {
        self.table
            .write()
            .map_err(|e| ObjtrailError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

impl ObjectStore for MemoryStore {
    fn create(&self, object: &BaseObject) -> ObjtrailResult<()> {
        self.write()?.insert(object)?;
        debug!(id = %object.id(), kind = %object.kind(), "object created");
        Ok(())
    }

    fn get(&self, id: &ObjectId) -> ObjtrailResult<BaseObject> {
        self.read()?.get(id)
    }

    fn update(&self, object: &BaseObject) -> ObjtrailResult<()> {
        self.write()?.replace(object)?;
        debug!(id = %object.id(), kind = %object.kind(), "object updated");
        Ok(())
    }

    fn delete(&self, id: &ObjectId) -> ObjtrailResult<()> {
        self.write()?.remove(id)?;
        debug!(id = %id, "object deleted");
        Ok(())
    }

    fn query(&self, kind: &ObjectKind, filters: &QueryFilters) -> ObjtrailResult<Vec<BaseObject>> {
        Ok(self.read()?.query(kind, filters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::thread;

    fn contact(id: &str) -> BaseObject {
        BaseObject::with_id(id, ObjectKind::Record, "alice")
            .with_tags(["lead"])
            .with_fields(json!({"name": "Ada", "email": "ada@example.com"}))
    }

    #[test]
    fn test_create_and_get() {
        let store = MemoryStore::new();
        let obj = contact("rec-1");

        store.create(&obj).unwrap();
        assert_eq!(store.get(obj.id()).unwrap(), obj);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_returned_value_is_isolated() {
        let store = MemoryStore::new();
        let obj = contact("rec-1");
        store.create(&obj).unwrap();

        let mut fetched = store.get(obj.id()).unwrap();
        fetched.set_field("name", json!("Changed"));
        fetched.add_tag("mutated");

        assert_eq!(store.get(obj.id()).unwrap(), obj);
    }

    #[test]
    fn test_input_value_is_isolated() {
        let store = MemoryStore::new();
        let mut obj = contact("rec-1");
        store.create(&obj).unwrap();
        let stored = obj.clone();

        obj.set_field("name", json!("Changed"));
        obj.tags.clear();

        assert_eq!(store.get(obj.id()).unwrap(), stored);
    }

    #[test]
    fn test_queried_values_are_isolated() {
        let store = MemoryStore::new();
        let obj = contact("rec-1");
        store.create(&obj).unwrap();

        let mut results = store.query(&ObjectKind::Record, &QueryFilters::new()).unwrap();
        results[0].set_field("name", json!("Changed"));

        assert_eq!(store.get(obj.id()).unwrap(), obj);
    }

    #[test]
    fn test_duplicate_create_keeps_original() {
        let store = MemoryStore::new();
        let original = contact("rec-1");
        store.create(&original).unwrap();

        let duplicate = contact("rec-1").with_fields(json!({"name": "Impostor"}));
        let err = store.create(&duplicate).unwrap_err();

        assert!(err.is_already_exists());
        assert_eq!(store.get(original.id()).unwrap(), original);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_missing_targets_are_not_found() {
        let store = MemoryStore::new();
        let id = ObjectId::from("nope");

        assert!(store.get(&id).unwrap_err().is_not_found());
        assert!(store.update(&contact("nope")).unwrap_err().is_not_found());
        assert!(store.delete(&id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_replaces_value() {
        let store = MemoryStore::new();
        let mut obj = contact("rec-1");
        store.create(&obj).unwrap();

        obj.set_field("email", json!("ada@newmail.com"));
        obj.touch();
        store.update(&obj).unwrap();

        assert_eq!(store.get(obj.id()).unwrap(), obj);
    }

    #[test]
    fn test_delete_removes_entry() {
        let store = MemoryStore::new();
        let obj = contact("rec-1");
        store.create(&obj).unwrap();

        store.delete(obj.id()).unwrap();
        assert!(store.get(obj.id()).unwrap_err().is_not_found());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_query_by_kind() {
        let store = MemoryStore::new();
        store.create(&contact("rec-1")).unwrap();
        store
            .create(&BaseObject::with_id("task-1", ObjectKind::Task, "alice"))
            .unwrap();
        store.create(&contact("rec-2")).unwrap();

        let records = store.query(&ObjectKind::Record, &QueryFilters::new()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|o| o.kind() == &ObjectKind::Record));

        let none = store.query(&ObjectKind::Message, &QueryFilters::new()).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_concurrent_creates() {
        let store = Arc::new(MemoryStore::new());
        let threads = 8;
        let per_thread = 50;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..per_thread {
                        let obj = BaseObject::with_id(
                            format!("obj-{}-{}", t, i),
                            ObjectKind::Task,
                            format!("actor-{}", t),
                        );
                        store.create(&obj).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len().unwrap(), threads * per_thread);
        let tasks = store.query(&ObjectKind::Task, &QueryFilters::new()).unwrap();
        assert_eq!(tasks.len(), threads * per_thread);
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let store = Arc::new(MemoryStore::new());
        store.create(&contact("rec-0")).unwrap();

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 1..100 {
                    store.create(&contact(&format!("rec-{}", i))).unwrap();
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..100 {
                        let seen = store.query(&ObjectKind::Record, &QueryFilters::new()).unwrap();
                        assert!(!seen.is_empty());
                        assert!(store.get(&ObjectId::from("rec-0")).is_ok());
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(store.len().unwrap(), 100);
    }
}

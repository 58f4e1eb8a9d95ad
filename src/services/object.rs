//! Object service
//!
//! Performs object mutations and records the matching activity for each one.
//! The mutation is written first; if recording the activity then fails, the
//! error is returned but the mutation stays. Activities are write-once and
//! only ever come from the generator, so every entry point here refuses them.

use crate::activity::{ActivityGenerator, ActivityHooks};
use crate::error::{ObjtrailError, ObjtrailResult};
use crate::models::{ActorId, BaseObject, ObjectId, ObjectKind};
use crate::storage::{ObjectStore, QueryFilters};

/// Service for object management with activity recording
pub struct ObjectService<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    hooks: ActivityGenerator<'a, S>,
}

impl<'a, S: ObjectStore + ?Sized> ObjectService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            hooks: ActivityGenerator::new(store),
        }
    }

    /// Store a new object and record its creation
    pub fn create(&self, object: BaseObject) -> ObjtrailResult<BaseObject> {
        if object.kind() == &ObjectKind::Activity {
            return Err(ObjtrailError::Validation(
                "Activities are recorded automatically and cannot be created directly".into(),
            ));
        }
        self.store.create(&object)?;
        self.hooks.on_create(&object)?;
        Ok(object)
    }

    pub fn get(&self, id: &ObjectId) -> ObjtrailResult<BaseObject> {
        self.store.get(id)
    }

    /// All objects of one kind, in insertion order
    pub fn list(&self, kind: &ObjectKind) -> ObjtrailResult<Vec<BaseObject>> {
        self.store.query(kind, &QueryFilters::new())
    }

    /// Apply `edit` to a stored object and record what changed
    ///
    /// An edit that changes nothing leaves the store untouched. Edits outside
    /// fields and tags (ACL) are stored but produce no `updated` activity.
    pub fn update<F>(&self, id: &ObjectId, edit: F) -> ObjtrailResult<BaseObject>
    where
        F: FnOnce(&mut BaseObject),
    {
        let before = self.get_mutable(id)?;
        let mut after = before.clone();
        edit(&mut after);

        if after == before {
            return Ok(before);
        }

        after.touch();
        self.store.update(&after)?;
        self.hooks.on_update(&before, &after)?;
        Ok(after)
    }

    /// Remove an object and record its deletion
    pub fn delete(&self, id: &ObjectId) -> ObjtrailResult<BaseObject> {
        let object = self.get_mutable(id)?;
        self.store.delete(id)?;
        self.hooks.on_delete(&object)?;
        Ok(object)
    }

    /// Grant `grantee` a role on an object and record the share
    pub fn share(
        &self,
        id: &ObjectId,
        sharer: &ActorId,
        grantee: &ActorId,
        role: &str,
    ) -> ObjtrailResult<BaseObject> {
        let mut object = self.get_mutable(id)?;
        object.grant(grantee.clone(), role);
        object.touch();
        self.store.update(&object)?;
        self.hooks.on_share(&object, sharer.clone(), grantee, role)?;
        Ok(object)
    }

    /// Fetch an object that may be changed; activities may not
    fn get_mutable(&self, id: &ObjectId) -> ObjtrailResult<BaseObject> {
        let object = self.store.get(id)?;
        if object.kind() == &ObjectKind::Activity {
            return Err(ObjtrailError::Validation(format!(
                "{} is an activity and cannot be modified",
                id
            )));
        }
        Ok(object)
    }
}

//! Activity generation hooks
//!
//! Translate a domain mutation into one activity written through the same
//! store. Hooks run after the mutation has already happened and never undo
//! it: if the activity write fails the error is returned and the event is
//! lost.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::diff::calculate_changes;
use super::entry::{ActivityObject, Verb, CHANGES_KEY};
use crate::error::ObjtrailResult;
use crate::models::{ActorId, BaseObject};
use crate::storage::ObjectStore;

/// Hooks the domain layer calls after mutating an object
pub trait ActivityHooks {
    /// Record that `object` was created
    fn on_create(&self, object: &BaseObject) -> ObjtrailResult<()>;

    /// Record the changes between `old` and `new`; a no-op update records nothing
    fn on_update(&self, old: &BaseObject, new: &BaseObject) -> ObjtrailResult<()>;

    /// Record that `object` was deleted
    fn on_delete(&self, object: &BaseObject) -> ObjtrailResult<()>;
}

/// Writes activities to an [`ObjectStore`]
pub struct ActivityGenerator<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ObjectStore + ?Sized> ActivityGenerator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Record an event with an explicit actor and return the stored activity
    pub fn record(
        &self,
        actor_id: impl Into<ActorId>,
        verb: Verb,
        object: &BaseObject,
        metadata: Map<String, Value>,
    ) -> ObjtrailResult<ActivityObject> {
        let activity = ActivityObject::new(
            actor_id,
            verb,
            object.id().clone(),
            object.kind().clone(),
            metadata,
        )?;

        if let Err(e) = self.store.create(activity.as_object()) {
            warn!(
                object_id = %object.id(),
                verb = %verb,
                error = %e,
                "failed to record activity"
            );
            return Err(e);
        }

        debug!(
            activity_id = %activity.id(),
            object_id = %object.id(),
            actor = %activity.actor_id(),
            verb = %verb,
            "activity recorded"
        );
        Ok(activity)
    }

    /// Record that `viewer` looked at `object`
    pub fn on_view(
        &self,
        object: &BaseObject,
        viewer: impl Into<ActorId>,
    ) -> ObjtrailResult<ActivityObject> {
        self.record(viewer, Verb::Viewed, object, Map::new())
    }

    /// Record that `sharer` gave `grantee` a role on `object`
    pub fn on_share(
        &self,
        object: &BaseObject,
        sharer: impl Into<ActorId>,
        grantee: &ActorId,
        role: &str,
    ) -> ObjtrailResult<ActivityObject> {
        let mut metadata = Map::new();
        metadata.insert("grantee".into(), Value::String(grantee.to_string()));
        metadata.insert("role".into(), Value::String(role.to_string()));
        self.record(sharer, Verb::Shared, object, metadata)
    }
}

impl<S: ObjectStore + ?Sized> ActivityHooks for ActivityGenerator<'_, S> {
    fn on_create(&self, object: &BaseObject) -> ObjtrailResult<()> {
        self.record(object.created_by.clone(), Verb::Created, object, Map::new())?;
        Ok(())
    }

    fn on_update(&self, old: &BaseObject, new: &BaseObject) -> ObjtrailResult<()> {
        let changes = calculate_changes(old, new);
        if changes.is_empty() {
            debug!(object_id = %new.id(), "no changes, skipping activity");
            return Ok(());
        }

        let mut metadata = Map::new();
        metadata.insert(CHANGES_KEY.into(), serde_json::to_value(&changes)?);

        // The editor is not known here; the object's creator stands in for it
        self.record(new.created_by.clone(), Verb::Updated, new, metadata)?;
        Ok(())
    }

    fn on_delete(&self, object: &BaseObject) -> ObjtrailResult<()> {
        self.record(object.created_by.clone(), Verb::Deleted, object, Map::new())?;
        Ok(())
    }
}

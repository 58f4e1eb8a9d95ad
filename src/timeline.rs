//! Timeline queries over the activity stream
//!
//! Read-only. Every query scans all activities of the store, drops records
//! that do not decode as activities, applies the filter, and returns the
//! survivors newest first.
//!
//! Activities with the same `created_at` are ordered by reverse insertion
//! order, so the activity written last comes first.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::activity::{ActivityObject, Verb};
use crate::error::ObjtrailResult;
use crate::models::{ActorId, ObjectId, ObjectKind};
use crate::storage::{ObjectStore, QueryFilters};

/// Conjunction of optional filter dimensions
///
/// An unset dimension matches everything. A `limit` of zero means no limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineFilter {
    pub object_id: Option<ObjectId>,
    pub actor_id: Option<ActorId>,
    pub verb: Option<Verb>,
    pub object_kind: Option<ObjectKind>,
    /// Inclusive lower bound on `created_at`
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`
    pub end_date: Option<DateTime<Utc>>,
    pub limit: usize,
}

impl TimelineFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(mut self, object_id: impl Into<ObjectId>) -> Self {
        self.object_id = Some(object_id.into());
        self
    }

    pub fn actor(mut self, actor_id: impl Into<ActorId>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }

    pub fn verb(mut self, verb: Verb) -> Self {
        self.verb = Some(verb);
        self
    }

    pub fn kind(mut self, kind: ObjectKind) -> Self {
        self.object_kind = Some(kind);
        self
    }

    pub fn since(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn until(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Check an activity against every set dimension
    pub fn matches(&self, activity: &ActivityObject) -> bool {
        if let Some(object_id) = &self.object_id {
            if activity.object_id() != object_id {
                return false;
            }
        }
        if let Some(actor_id) = &self.actor_id {
            if activity.actor_id() != actor_id {
                return false;
            }
        }
        if let Some(verb) = self.verb {
            if activity.verb() != verb {
                return false;
            }
        }
        if let Some(kind) = &self.object_kind {
            if activity.object_kind() != kind {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if activity.created_at() < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if activity.created_at() > end {
                return false;
            }
        }
        true
    }
}

/// Query engine over the activities of one store
pub struct Timeline<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ObjectStore + ?Sized> Timeline<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Activities matching `filter`, newest first
    pub fn get_timeline(&self, filter: &TimelineFilter) -> ObjtrailResult<Vec<ActivityObject>> {
        let objects = self
            .store
            .query(&ObjectKind::Activity, &QueryFilters::new())?;

        // Reverse insertion order first so the stable sort puts later writes
        // ahead of earlier ones with the same timestamp
        let mut activities: Vec<ActivityObject> = objects
            .into_iter()
            .rev()
            .filter_map(|object| {
                let id = object.id().clone();
                match ActivityObject::from_object(object) {
                    Ok(activity) => Some(activity),
                    Err(e) => {
                        debug!(id = %id, error = %e, "skipping undecodable activity");
                        None
                    }
                }
            })
            .filter(|activity| filter.matches(activity))
            .collect();

        activities.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        if filter.limit > 0 {
            activities.truncate(filter.limit);
        }

        Ok(activities)
    }

    /// Every activity about one object
    pub fn get_timeline_for_object(&self, object_id: &ObjectId) -> ObjtrailResult<Vec<ActivityObject>> {
        self.get_timeline(&TimelineFilter::new().object(object_id.clone()))
    }

    /// The `limit` most recent activities
    pub fn get_recent_activities(&self, limit: usize) -> ObjtrailResult<Vec<ActivityObject>> {
        self.get_timeline(&TimelineFilter::new().limit(limit))
    }

    pub fn get_activities_by_actor(
        &self,
        actor_id: &ActorId,
        limit: usize,
    ) -> ObjtrailResult<Vec<ActivityObject>> {
        self.get_timeline(&TimelineFilter::new().actor(actor_id.clone()).limit(limit))
    }

    pub fn get_activities_by_verb(
        &self,
        verb: Verb,
        limit: usize,
    ) -> ObjtrailResult<Vec<ActivityObject>> {
        self.get_timeline(&TimelineFilter::new().verb(verb).limit(limit))
    }

    /// One activity by id. Store and decode errors propagate unchanged.
    pub fn get_activity(&self, id: &ObjectId) -> ObjtrailResult<ActivityObject> {
        ActivityObject::from_object(self.store.get(id)?)
    }
}

//! objtrail - schema-free objects with an activity audit trail
//!
//! This library provides a generic object model for a personal contact and
//! deal tracker together with the activity trail recorded for it: every
//! create, update and delete of an object can be turned into an immutable
//! activity, and those activities can be queried as a timeline.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: The `BaseObject` envelope, ids, kinds and typed field views
//! - `storage`: The `ObjectStore` contract, `MemoryStore` and `JsonFileStore`
//! - `activity`: Activity objects, change diffs and the generator hooks
//! - `timeline`: Filtered, newest-first queries over activities
//! - `services`: Mutations paired with activity recording
//! - `config`: Configuration and path management
//! - `display`, `cli`: Terminal front end
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use objtrail::activity::{ActivityGenerator, ActivityHooks, Verb};
//! use objtrail::models::{BaseObject, ObjectKind};
//! use objtrail::storage::{MemoryStore, ObjectStore};
//! use objtrail::timeline::Timeline;
//!
//! # fn main() -> objtrail::ObjtrailResult<()> {
//! let store = MemoryStore::new();
//! let task = BaseObject::new(ObjectKind::Task, "alice");
//!
//! store.create(&task)?;
//! ActivityGenerator::new(&store).on_create(&task)?;
//!
//! let history = Timeline::new(&store).get_timeline_for_object(task.id())?;
//! assert_eq!(history[0].verb(), Verb::Created);
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod timeline;

pub use error::{ObjtrailError, ObjtrailResult};

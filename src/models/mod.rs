//! Core data models for objtrail
//!
//! This module contains the generic object envelope and the typed views
//! individual object kinds define over its open fields document.

pub mod fields;
pub mod ids;
pub mod kind;
pub mod object;

pub use fields::{KindFields, RecordFields, TaskFields, TaskStatus, UserFields};
pub use ids::{ActorId, ObjectId};
pub use kind::ObjectKind;
pub use object::{AclEntry, BaseObject, ROLE_OWNER};

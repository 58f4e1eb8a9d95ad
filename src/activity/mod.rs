//! Activity audit trail
//!
//! Records create, update, delete (and view/share) events of stored objects
//! as immutable activity objects written through the same [`ObjectStore`].
//!
//! # Architecture
//!
//! - `ActivityObject`: one audit event, stored as a `BaseObject` of kind
//!   `activity`.
//! - `calculate_changes`: the field-level diff carried by `updated` events.
//! - `ActivityGenerator`: the [`ActivityHooks`] the domain layer calls after
//!   each mutation.
//!
//! Recording is best-effort. The mutation and its activity are two separate
//! store writes; a failing activity write leaves the mutation in place.
//!
//! # Example
//!
//! ```rust,ignore
//! use objtrail::activity::{ActivityGenerator, ActivityHooks};
//!
//! let hooks = ActivityGenerator::new(&store);
//!
//! store.create(&contact)?;
//! hooks.on_create(&contact)?;
//!
//! let before = store.get(contact.id())?;
//! store.update(&edited)?;
//! hooks.on_update(&before, &edited)?;
//! ```
//!
//! [`ObjectStore`]: crate::storage::ObjectStore

mod diff;
mod entry;
mod generator;

pub use diff::{calculate_changes, format_changes, Changes, FieldChange, FIELDS_KEY, TAGS_KEY};
pub use entry::{ActivityFields, ActivityObject, Verb, CHANGES_KEY};
pub use generator::{ActivityGenerator, ActivityHooks};

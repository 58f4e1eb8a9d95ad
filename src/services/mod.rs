//! Service layer for objtrail
//!
//! Business logic tying object mutations to the activity trail.

pub mod object;

pub use object::ObjectService;

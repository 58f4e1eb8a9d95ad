//! Configuration module for objtrail
//!
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ObjtrailPaths;
pub use settings::Settings;

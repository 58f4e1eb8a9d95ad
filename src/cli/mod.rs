//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod object;
pub mod timeline;

pub use object::{handle_object_command, ObjectCommands};
pub use timeline::{handle_recent_command, handle_timeline_command, TimelineArgs};

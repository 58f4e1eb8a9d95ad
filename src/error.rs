//! Custom error types for objtrail
//!
//! This module defines the error hierarchy for the object store, activity
//! generator and timeline using thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for objtrail operations
#[derive(Error, Debug)]
pub enum ObjtrailError {
    /// Target of a get/update/delete is absent
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Create with an id that is already stored
    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: &'static str,
        identifier: String,
    },

    /// An object's fields cannot be read as the expected typed view
    #[error("Decode error: {0}")]
    Decode(String),

    /// Storage errors (lock poisoning, persistence)
    #[error("Storage error: {0}")]
    Storage(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ObjtrailError {
    /// Create a "not found" error for objects
    pub fn object_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Object",
            identifier: identifier.into(),
        }
    }

    /// Create an "already exists" error for objects
    pub fn object_already_exists(identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type: "Object",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an "already exists" error
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Check if this is a decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

impl From<std::io::Error> for ObjtrailError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ObjtrailError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for objtrail operations
pub type ObjtrailResult<T> = Result<T, ObjtrailError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ObjtrailError::object_not_found("task-1");
        assert_eq!(err.to_string(), "Object not found: task-1");
        assert!(err.is_not_found());
        assert!(!err.is_already_exists());
    }

    #[test]
    fn test_already_exists_error() {
        let err = ObjtrailError::object_already_exists("task-1");
        assert_eq!(err.to_string(), "Object already exists: task-1");
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_decode_error() {
        let err = ObjtrailError::Decode("missing field `verb`".into());
        assert_eq!(err.to_string(), "Decode error: missing field `verb`");
        assert!(err.is_decode());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ObjtrailError = io_err.into();
        assert!(matches!(err, ObjtrailError::Io(_)));
    }
}

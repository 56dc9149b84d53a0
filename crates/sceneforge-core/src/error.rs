//! Unified error handling for sceneforge
//!
//! This module provides a single error type covering scene validation
//! and export failures across the sceneforge crates.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all sceneforge operations
#[derive(Error, Debug)]
pub enum Error {
    // ==================== I/O Errors ====================

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output directory could not be created or written to
    #[error("Output directory not writable: {path}")]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ==================== Serialization Errors ====================

    /// JSON serialization or deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ==================== Scene Errors ====================

    /// Two siblings share the same name, so their derived filenames collide
    #[error("Duplicate node name {name:?} under {parent:?}")]
    DuplicateNodeName {
        parent: String,
        name: String,
    },

    /// A face corner references an attribute index outside its array
    #[error("Mesh index out of bounds: {attribute} index {index} (len {len})")]
    IndexOutOfBounds {
        attribute: &'static str,
        index: u32,
        len: usize,
    },

    /// Invalid scene data
    #[error("Invalid data: {message}")]
    InvalidData {
        message: String,
    },

    // ==================== General Errors ====================

    /// Custom error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

/// Result type using the unified Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Error::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid data error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Error::InvalidData {
            message: message.into(),
        }
    }

    /// Check if this is a scene validation error (as opposed to I/O)
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::DuplicateNodeName { .. }
                | Error::IndexOutOfBounds { .. }
                | Error::InvalidData { .. }
        )
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_with_context() {
        let err = Error::invalid_data("empty name");
        let contextualized = err.with_context("while exporting node");

        assert!(contextualized.to_string().contains("while exporting node"));
    }

    #[test]
    fn test_is_validation_error() {
        assert!(Error::DuplicateNodeName {
            parent: "Root".into(),
            name: "Child".into(),
        }
        .is_validation_error());

        assert!(Error::IndexOutOfBounds {
            attribute: "position",
            index: 5,
            len: 3,
        }
        .is_validation_error());

        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(!io.is_validation_error());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::invalid_data("bad mesh"));
        let with_context = result.context("loading scene");

        assert!(with_context.is_err());
        assert!(with_context.unwrap_err().to_string().contains("loading scene"));
    }
}

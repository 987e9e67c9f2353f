//! Unified error types for the Stackforge workspace.
//!
//! Field-level problems (`MalformedEntry`) are recoverable and handled
//! locally by the mutators. Everything else is surfaced to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum StackforgeError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value or document structure is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// A ports/volumes/environment entry does not follow its grammar.
    #[error("malformed {field} entry \"{entry}\": {reason}")]
    MalformedEntry {
        /// Field category the entry belongs to.
        field: &'static str,
        /// The offending entry, verbatim.
        entry: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// YAML serialization or deserialization failed.
    #[error("yaml error: {source}")]
    Yaml {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },
}

impl StackforgeError {
    /// Builds a [`StackforgeError::MalformedEntry`].
    #[must_use]
    pub fn malformed(field: &'static str, entry: &str, reason: &'static str) -> Self {
        Self::MalformedEntry {
            field,
            entry: entry.to_owned(),
            reason,
        }
    }

    /// Returns `true` for errors a mutator may recover from locally.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedEntry { .. })
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, StackforgeError>;

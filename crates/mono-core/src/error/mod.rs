//! Error types and result aliases for mono operations.
//!
//! Discovery itself never fails outward: unreadable manifests and vanished
//! directories are recovered where they happen. The variants here cover what
//! is left, namely configuration mistakes, programmer errors at the public
//! surface, and the non-fatal artifact write.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all mono operations
#[derive(Error, Debug)]
pub enum MonoError {
    // Manifest errors
    #[error("Failed to parse {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    // Config errors
    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Resolution errors
    #[error("Invalid specifier '{specifier}': {reason}")]
    InvalidSpecifier { specifier: String, reason: String },

    // Artifact errors
    #[error("Failed to write mapping artifact {}", path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for mono operations
pub type MonoResult<T> = Result<T, MonoError>;

impl MonoError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a config validation error
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MonoError::ManifestParse { .. } | MonoError::ArtifactWrite { .. } | MonoError::Io { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            MonoError::ManifestParse { .. } => {
                Some("Fix the JSON syntax of the package.json; the directory is ignored until then")
            },
            MonoError::ConfigValidation { .. } => {
                Some("Check the MONO_* environment variables for typos")
            },
            MonoError::InvalidSpecifier { .. } => {
                Some("Pass the import specifier exactly as written in the source file")
            },
            MonoError::ArtifactWrite { .. } => {
                Some("Make the working directory writable or set MONO_ARTIFACT=0")
            },
            MonoError::Io { .. } => None,
        }
    }
}

//! Configuration parsing for mono
//!
//! This crate reads package.json manifests the way discovery needs them and
//! holds the settings layered together for one resolution session.

pub mod json;
pub mod settings;

// Re-export main types
pub use json::{read_manifest, ManifestRead, PackageJson, WorkspacesConfig, MANIFEST_FILE};
pub use settings::{ConfigLayering, DiscoveryStrategy, MonoSettings, DEFAULT_SOURCE_ENTRY};

use mono_core::error::MonoError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, MonoError>;

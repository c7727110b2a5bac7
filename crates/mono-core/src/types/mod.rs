//! Core data types for mono package discovery.
//!
//! This module provides the fundamental types used throughout the workspace:
//! - Package descriptors for locally discovered packages
//! - Source entry records and where they came from

pub mod package;

// Re-export all public types
pub use package::{EntryOrigin, PackageDescriptor, SourceEntry};

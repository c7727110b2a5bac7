//! # mono-core
//!
//! Core types and utilities shared across all mono crates.
//!
//! This crate provides:
//! - PackageDescriptor and SourceEntry types describing local packages
//! - MonoError enum for unified error handling
//! - Path helpers used during discovery and resolution
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (PackageDescriptor, SourceEntry, etc.)
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{MonoError, MonoResult};
pub use types::{EntryOrigin, PackageDescriptor, SourceEntry};

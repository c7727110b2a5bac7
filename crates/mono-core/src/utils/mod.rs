//! Utility functions and helpers.
//!
//! Common functionality used across multiple mono crates.

pub mod path;

// Re-export commonly used utilities
pub use path::{absolutize, is_dependency_cache, is_hidden, normalize_path, DEPENDENCY_CACHE_DIR};

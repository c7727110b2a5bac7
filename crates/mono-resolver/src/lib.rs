//! Local package discovery and source-entry resolution for mono
//!
//! This crate finds every local package inside the project boundary, maps
//! package names to their source entry points, and answers resolution queries
//! for the two host integrations: a module loader hook and a bundler plugin.
//! Anything it does not handle is passed to the host's own resolver.

pub mod artifact;
pub mod enumerate;
pub mod hooks;
pub mod logging;
pub mod mapping;
pub mod pattern;
pub mod root;
pub mod session;
pub mod specifier;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types
pub use enumerate::enumerate;
pub use hooks::{BundlerPlugin, HookResolution, LoaderHook, ResolveContext};
pub use mapping::DiscoveryMapping;
pub use root::{DiscoveryRoots, RootLocator, ROOT_MARKERS};
pub use session::{discover, ResolutionResult, Session};
pub use specifier::{classify, is_main_entry, SpecifierKind};

use mono_core::error::MonoError;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, MonoError>;

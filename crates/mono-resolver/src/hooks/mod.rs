//! Host integrations
//!
//! Two thin adapters over a shared [`Session`](crate::session::Session):
//! - [`LoaderHook`] intercepts a module loader's resolve step and answers
//!   with a `file://` URL for local packages
//! - [`BundlerPlugin`] answers a bundler's `resolveId` with an absolute path
//!   once the bundler configuration has been resolved

pub mod bundler;
pub mod loader;

pub use bundler::BundlerPlugin;
pub use loader::LoaderHook;

use mono_core::error::{MonoError, MonoResult};
use std::path::Path;
use url::Url;

/// Context the module loader passes alongside a specifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveContext {
    /// URL of the importing module, if any
    pub parent_url: Option<String>,
    /// Active export conditions
    pub conditions: Vec<String>,
}

/// Answer to a loader resolve request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookResolution {
    pub url: String,
    /// Skip the remaining resolvers in the chain
    pub short_circuit: bool,
    pub format: Option<String>,
}

impl ResolveContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(mut self, parent_url: impl Into<String>) -> Self {
        self.parent_url = Some(parent_url.into());
        self
    }
}

impl HookResolution {
    /// Short-circuiting resolution pointing at a local source file
    pub fn short_circuit(path: &Path) -> MonoResult<Self> {
        let url = Url::from_file_path(path).map_err(|()| MonoError::InvalidSpecifier {
            specifier: path.display().to_string(),
            reason: "source entry is not an absolute path".to_string(),
        })?;

        Ok(Self {
            url: url.to_string(),
            short_circuit: true,
            format: None,
        })
    }

    /// Resolution produced by a downstream resolver
    pub fn delegated(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            short_circuit: false,
            format: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

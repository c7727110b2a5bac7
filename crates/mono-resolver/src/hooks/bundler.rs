//! Bundler plugin

use crate::logging::init_logging;
use crate::session::Session;
use mono_config::DiscoveryStrategy;
use mono_core::error::MonoResult;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// `resolveId` plugin for a bundler, backed by full-tree discovery
///
/// Queries are answered only after [`BundlerPlugin::config_resolved`] has
/// run; before that every specifier falls through to the bundler.
#[derive(Debug)]
pub struct BundlerPlugin {
    session: Arc<Session>,
    resolved: AtomicBool,
}

impl BundlerPlugin {
    /// Plugin name reported to the bundler
    pub const NAME: &'static str = "mono";

    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            resolved: AtomicBool::new(false),
        }
    }

    /// Plugin for the process working directory, full-tree strategy unless
    /// `MONO_STRATEGY` says otherwise
    pub fn from_env() -> MonoResult<Self> {
        let session = Session::from_env(DiscoveryStrategy::FullTree)?;
        init_logging(session.settings().debug);
        Ok(Self::new(Arc::new(session)))
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Configuration hook: run discovery and start answering queries.
    /// Returns the number of local packages found.
    pub async fn config_resolved(&self) -> usize {
        let mapping = self.session.mapping().await;
        self.resolved.store(true, Ordering::SeqCst);
        mapping.len()
    }

    /// Absolute source entry for `specifier`, or `None` to let the bundler resolve it
    pub async fn resolve_id(&self, specifier: &str) -> MonoResult<Option<PathBuf>> {
        if !self.resolved.load(Ordering::SeqCst) {
            debug!("Configuration not resolved yet, skipping {}", specifier);
            return Ok(None);
        }

        let Some(path) = self.session.lookup(specifier).await? else {
            return Ok(None);
        };

        if !path.exists() {
            warn!("Source entry for {} does not exist: {}", specifier, path.display());
            return Ok(None);
        }

        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use camino::Utf8PathBuf;
    use mono_config::MonoSettings;

    fn plugin(fx: &Fixture, cwd: &str) -> BundlerPlugin {
        let settings = MonoSettings::new(
            Utf8PathBuf::from_path_buf(fx.path(cwd)).unwrap(),
            DiscoveryStrategy::FullTree,
        )
        .with_ceiling(Utf8PathBuf::from_path_buf(fx.root()).unwrap())
        .with_artifact(false);
        BundlerPlugin::new(Arc::new(Session::new(settings)))
    }

    fn fixture() -> Fixture {
        let fx = Fixture::new();
        fx.mkdir("repo/.vscode");
        fx.manifest("repo/web", r#"{ "name": "web" }"#);
        fx.manifest("repo/libs/ui", r#"{ "name": "@acme/ui", "monorepo": "./src/main.tsx" }"#);
        fx.file("repo/libs/ui/src/main.tsx", "export {};\n");
        // Default entry, but no such file on disk
        fx.manifest("repo/libs/icons", r#"{ "name": "@acme/icons" }"#);
        fx
    }

    #[tokio::test]
    async fn test_queries_before_config_fall_through() {
        let fx = fixture();
        let plugin = plugin(&fx, "repo/web");

        assert_eq!(plugin.resolve_id("@acme/ui").await.unwrap(), None);
        assert!(!plugin.session().is_discovered());
    }

    #[tokio::test]
    async fn test_resolve_after_config() {
        let fx = fixture();
        let plugin = plugin(&fx, "repo/web");

        assert_eq!(plugin.config_resolved().await, 3);
        assert_eq!(
            plugin.resolve_id("@acme/ui").await.unwrap(),
            Some(fx.path("repo/libs/ui/src/main.tsx"))
        );
        assert_eq!(plugin.resolve_id("@acme/ui/button").await.unwrap(), None);
        assert_eq!(plugin.resolve_id("react").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_entry_falls_through() {
        let fx = fixture();
        let plugin = plugin(&fx, "repo/web");
        plugin.config_resolved().await;

        assert!(plugin.session().mapping().await.contains("@acme/icons"));
        assert_eq!(plugin.resolve_id("@acme/icons").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_config_resolved_twice_discovers_once() {
        let fx = fixture();
        let plugin = plugin(&fx, "repo/web");

        plugin.config_resolved().await;
        plugin.config_resolved().await;

        assert_eq!(plugin.session().discovery_runs(), 1);
        assert_eq!(BundlerPlugin::NAME, "mono");
    }
}

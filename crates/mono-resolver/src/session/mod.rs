//! Resolution session
//!
//! A [`Session`] owns the settings and the lazily built [`DiscoveryMapping`].
//! Discovery runs at most once per session: the first query starts it on the
//! blocking pool and every concurrent query awaits the same result. Once
//! built, the mapping is never refreshed, even if the filesystem changes.

use crate::artifact::write_artifact;
use crate::enumerate::enumerate;
use crate::mapping::DiscoveryMapping;
use crate::root::RootLocator;
use crate::specifier::classify;
use mono_config::{DiscoveryStrategy, MonoSettings};
use mono_core::error::{MonoError, MonoResult};
use mono_core::types::{EntryOrigin, PackageDescriptor, SourceEntry};
use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Outcome of a resolution query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult<T> {
    /// Local package: load this source entry, skip the host resolver
    ShortCircuit(PathBuf),
    /// Not handled: the host resolver's result, unchanged
    Delegated(T),
}

/// Discovery state shared by the host integrations
#[derive(Debug)]
pub struct Session {
    settings: Arc<MonoSettings>,
    mapping: Arc<OnceCell<Arc<DiscoveryMapping>>>,
    discovery_runs: Arc<AtomicUsize>,
}

impl Session {
    pub fn new(settings: MonoSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            mapping: Arc::new(OnceCell::new()),
            discovery_runs: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Session for the process working directory with `MONO_*` overrides
    pub fn from_env(strategy: DiscoveryStrategy) -> MonoResult<Self> {
        Ok(Self::new(MonoSettings::from_env(strategy)?))
    }

    pub fn settings(&self) -> &MonoSettings {
        &self.settings
    }

    /// Number of discovery passes started by this session
    pub fn discovery_runs(&self) -> usize {
        self.discovery_runs.load(Ordering::SeqCst)
    }

    pub fn is_discovered(&self) -> bool {
        self.mapping.initialized()
    }

    /// The mapping, running discovery on first use
    ///
    /// Discovery runs in a spawned task that fills the shared cell; a caller
    /// dropped mid-discovery does not abandon the build.
    pub async fn mapping(&self) -> Arc<DiscoveryMapping> {
        if let Some(mapping) = self.mapping.get() {
            return Arc::clone(mapping);
        }

        let cell = Arc::clone(&self.mapping);
        let settings = Arc::clone(&self.settings);
        let runs = Arc::clone(&self.discovery_runs);

        let task = tokio::spawn(async move {
            Arc::clone(cell.get_or_init(|| build_mapping(settings, runs)).await)
        });

        match task.await {
            Ok(mapping) => mapping,
            Err(e) => {
                warn!("Package discovery failed, resolving without local packages: {}", e);
                Arc::new(DiscoveryMapping::new())
            },
        }
    }

    /// Absolute source entry for `specifier`, or `None` when it is not handled
    pub async fn lookup(&self, specifier: &str) -> MonoResult<Option<PathBuf>> {
        if specifier.is_empty() {
            return Err(MonoError::InvalidSpecifier {
                specifier: specifier.to_string(),
                reason: "specifier is empty".to_string(),
            });
        }

        let mapping = self.mapping().await;

        let kind = classify(specifier);
        if !kind.is_main_entry() {
            debug!("Passing through {}: {}", specifier, kind);
            return Ok(None);
        }

        let Some(pkg) = mapping.get(specifier) else {
            debug!("Passing through {}: not a local package", specifier);
            return Ok(None);
        };

        match pkg.entry_path() {
            Some(path) => {
                debug!("Rewriting {} -> {}", specifier, path.display());
                Ok(Some(path))
            },
            None => {
                debug!("Passing through {}: no source entry in {}", specifier, pkg.directory.display());
                Ok(None)
            },
        }
    }

    /// Resolve `specifier`, delegating to `next` when it is not a local main entry
    pub async fn resolve<F, Fut, T>(&self, specifier: &str, next: F) -> MonoResult<ResolutionResult<T>>
    where
        F: FnOnce(&str) -> Fut,
        Fut: Future<Output = T>,
    {
        match self.lookup(specifier).await? {
            Some(path) => Ok(ResolutionResult::ShortCircuit(path)),
            None => Ok(ResolutionResult::Delegated(next(specifier).await)),
        }
    }
}

/// Run [`discover`] on the blocking pool, counting the pass
async fn build_mapping(settings: Arc<MonoSettings>, runs: Arc<AtomicUsize>) -> Arc<DiscoveryMapping> {
    let task = tokio::task::spawn_blocking(move || {
        runs.fetch_add(1, Ordering::SeqCst);
        discover(&settings)
    });

    match task.await {
        Ok(mapping) => Arc::new(mapping),
        Err(e) => {
            warn!("Package discovery failed, resolving without local packages: {}", e);
            Arc::new(DiscoveryMapping::new())
        },
    }
}

/// Run one full discovery pass: locate roots, enumerate, apply extras, write the artifact
pub fn discover(settings: &MonoSettings) -> DiscoveryMapping {
    let cwd = settings.cwd.as_std_path();
    let roots = RootLocator::from_settings(settings).locate(cwd);

    if roots.is_empty() {
        info!("No project root found from {}, local package discovery disabled", cwd.display());
    }

    let mut mapping = enumerate(&roots, settings.default_entry());

    for (name, entry) in &settings.extra_packages {
        mapping.override_with(PackageDescriptor::new(
            name.clone(),
            cwd.to_path_buf(),
            Some(SourceEntry::new(entry.as_str(), EntryOrigin::Extra)),
        ));
    }

    info!("Discovered {} local packages ({} strategy)", mapping.len(), settings.strategy);

    if settings.strategy == DiscoveryStrategy::FullTree && settings.write_artifact && !roots.is_empty() {
        let path = settings.artifact_path();
        match write_artifact(path.as_std_path(), &mapping) {
            Ok(()) => debug!("Wrote mapping artifact {}", path),
            Err(e) => warn!("Mapping artifact not written: {:?}", e),
        }
    }

    mapping
}

//! Project root location
//!
//! Two strategies walk upward from the working directory:
//! - marker-based: the outermost ancestor holding any marker file
//! - workspace chain: every ancestor whose manifest declares workspaces,
//!   nearest first
//!
//! The filesystem root itself is never considered. An optional ceiling stops
//! the walk early (the ceiling directory is still inspected).

use mono_config::{read_manifest, DiscoveryStrategy, ManifestRead, MonoSettings, MANIFEST_FILE};
use mono_core::utils::{absolutize, normalize_path};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Files and directories whose presence marks a candidate project boundary
pub const ROOT_MARKERS: [&str; 4] = [".idea", ".vscode", ".git", MANIFEST_FILE];

/// Roots found by a [`RootLocator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryRoots {
    /// Workspace roots, nearest to the start directory first
    Chain(Vec<PathBuf>),
    /// Outermost marked ancestor, if any
    Outermost(Option<PathBuf>),
}

/// Upward project root discovery
#[derive(Debug, Clone)]
pub struct RootLocator {
    strategy: DiscoveryStrategy,
    ceiling: Option<PathBuf>,
}

impl DiscoveryRoots {
    /// No root found: discovery is disabled
    pub fn is_empty(&self) -> bool {
        match self {
            DiscoveryRoots::Chain(chain) => chain.is_empty(),
            DiscoveryRoots::Outermost(root) => root.is_none(),
        }
    }
}

impl RootLocator {
    pub fn new(strategy: DiscoveryStrategy) -> Self {
        Self {
            strategy,
            ceiling: None,
        }
    }

    pub fn with_ceiling(mut self, ceiling: Option<PathBuf>) -> Self {
        self.ceiling = ceiling.map(|dir| normalize_path(&dir));
        self
    }

    pub fn from_settings(settings: &MonoSettings) -> Self {
        Self::new(settings.strategy)
            .with_ceiling(settings.ceiling.as_ref().map(|dir| dir.clone().into_std_path_buf()))
    }

    /// Locate roots starting from `start`
    pub fn locate(&self, start: &Path) -> DiscoveryRoots {
        match self.strategy {
            DiscoveryStrategy::Workspaces => DiscoveryRoots::Chain(self.find_workspace_chain(start)),
            DiscoveryStrategy::FullTree => DiscoveryRoots::Outermost(self.find_outermost_root(start)),
        }
    }

    /// Outermost ancestor containing any of [`ROOT_MARKERS`]
    pub fn find_outermost_root(&self, start: &Path) -> Option<PathBuf> {
        let mut outermost = None;

        for dir in self.ancestors(start) {
            if has_root_marker(&dir) {
                debug!("Root marker found in {}", dir.display());
                outermost = Some(dir);
            }
        }

        match &outermost {
            Some(root) => debug!("Project root: {}", root.display()),
            None => debug!("No project root found above {}", start.display()),
        }
        outermost
    }

    /// Every ancestor whose manifest declares workspace patterns, nearest first
    pub fn find_workspace_chain(&self, start: &Path) -> Vec<PathBuf> {
        let chain: Vec<PathBuf> = self
            .ancestors(start)
            .into_iter()
            .filter(|dir| match read_manifest(dir) {
                ManifestRead::Found(manifest) => manifest.declares_workspaces(),
                ManifestRead::Missing | ManifestRead::Invalid(_) => false,
            })
            .collect();

        debug!("Found {} workspace roots above {}", chain.len(), start.display());
        chain
    }

    /// Ancestors of `start` (inclusive), nearest first, stopping before the
    /// filesystem root and after the ceiling
    fn ancestors(&self, start: &Path) -> Vec<PathBuf> {
        let start = absolute_start(start);
        let mut dirs = Vec::new();

        for dir in start.ancestors() {
            if dir.parent().is_none() {
                break;
            }
            dirs.push(dir.to_path_buf());
            if self.ceiling.as_deref() == Some(dir) {
                break;
            }
        }

        dirs
    }
}

/// Check if `dir` contains any root marker
pub fn has_root_marker(dir: &Path) -> bool {
    ROOT_MARKERS.iter().any(|marker| dir.join(marker).exists())
}

fn absolute_start(start: &Path) -> PathBuf {
    if start.is_absolute() {
        return normalize_path(start);
    }
    match std::env::current_dir() {
        Ok(cwd) => absolutize(&cwd, start),
        Err(_) => normalize_path(start),
    }
}

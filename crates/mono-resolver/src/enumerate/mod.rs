//! Package enumeration
//!
//! One entry point, [`enumerate`], dispatching on the shape of the located
//! roots:
//! - a workspace chain is expanded pattern by pattern, nearest root first
//! - a single outermost root is walked in full, ancestors before descendants
//!
//! Both follow the same precedence rule: the first registration of a name
//! wins, and the traversal order decides what comes first.

use crate::mapping::DiscoveryMapping;
use crate::pattern::{expand, is_skipped_dir, readable};
use crate::root::DiscoveryRoots;
use mono_config::{read_manifest, ManifestRead, PackageJson};
use mono_core::types::PackageDescriptor;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Enumerate every local package reachable from `roots`
pub fn enumerate(roots: &DiscoveryRoots, default_entry: Option<&str>) -> DiscoveryMapping {
    match roots {
        DiscoveryRoots::Chain(chain) => WorkspaceEnumerator::new(default_entry).run(chain),
        DiscoveryRoots::Outermost(Some(root)) => enumerate_tree(root, default_entry),
        DiscoveryRoots::Outermost(None) => DiscoveryMapping::new(),
    }
}

/// Pattern-driven enumeration over a chain of workspace roots
struct WorkspaceEnumerator<'a> {
    default_entry: Option<&'a str>,
    mapping: DiscoveryMapping,
    scanned: HashSet<PathBuf>,
}

impl<'a> WorkspaceEnumerator<'a> {
    fn new(default_entry: Option<&'a str>) -> Self {
        Self {
            default_entry,
            mapping: DiscoveryMapping::new(),
            scanned: HashSet::new(),
        }
    }

    fn run(mut self, chain: &[PathBuf]) -> DiscoveryMapping {
        for root in chain {
            self.collect(root);
        }
        self.mapping
    }

    /// Register the packages matched by the patterns of the workspace at `ws_root`
    fn collect(&mut self, ws_root: &Path) {
        // A workspace can list itself or an already scanned chain root
        if !self.scanned.insert(ws_root.to_path_buf()) {
            return;
        }

        let Some(root_manifest) = manifest_in(ws_root) else {
            return;
        };
        debug!("Scanning workspace {}", ws_root.display());

        for pattern in root_manifest.workspace_patterns() {
            for dir in expand(ws_root, pattern) {
                let Some(manifest) = manifest_in(&dir) else {
                    continue;
                };
                let Some(name) = manifest.name() else {
                    continue;
                };

                self.mapping.register(PackageDescriptor::from_manifest(
                    name.to_string(),
                    dir.clone(),
                    manifest.monorepo_entry(),
                    self.default_entry,
                ));

                if manifest.declares_workspaces() {
                    self.collect(&dir);
                }
            }
        }
    }
}

/// Full-tree enumeration below a single root
fn enumerate_tree(root: &Path, default_entry: Option<&str>) -> DiscoveryMapping {
    let mut mapping = DiscoveryMapping::new();
    debug!("Walking {}", root.display());

    let dirs = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry))
        .filter_map(readable)
        .filter(|entry| entry.file_type().is_dir());

    for entry in dirs {
        let Some(manifest) = manifest_in(entry.path()) else {
            continue;
        };
        let Some(name) = manifest.name() else {
            continue;
        };

        mapping.register(PackageDescriptor::from_manifest(
            name.to_string(),
            entry.path().to_path_buf(),
            manifest.monorepo_entry(),
            default_entry,
        ));
    }

    mapping
}

/// Parsed manifest of `dir`; missing and invalid manifests both skip the directory
fn manifest_in(dir: &Path) -> Option<PackageJson> {
    match read_manifest(dir) {
        ManifestRead::Found(manifest) => Some(manifest),
        ManifestRead::Missing => None,
        ManifestRead::Invalid(e) => {
            debug!("Skipping {}: {}", dir.display(), e);
            None
        },
    }
}

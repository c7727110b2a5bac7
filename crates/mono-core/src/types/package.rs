//! Package descriptor types.
//!
//! Defines the record kept for every local package found during discovery.

use crate::utils::path::normalize_path;
use std::path::{Component, Path, PathBuf};

/// A local package discovered inside the project boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    /// Declared package name (e.g. "utils" or "@scope/utils")
    pub name: String,
    /// Absolute path of the package root directory
    pub directory: PathBuf,
    /// Source entry relative to `directory`, if one is known
    pub source_entry: Option<SourceEntry>,
}

/// Source entry of a package and where the value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub path: String,
    pub origin: EntryOrigin,
}

/// Origin of a source entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryOrigin {
    /// Explicit `monorepo` field in the package manifest
    Manifest,
    /// Convention default applied when the manifest has no override
    Default,
    /// Extra mapping supplied through configuration
    Extra,
}

impl PackageDescriptor {
    /// Create a new descriptor
    pub fn new(name: String, directory: PathBuf, source_entry: Option<SourceEntry>) -> Self {
        Self {
            name,
            directory,
            source_entry,
        }
    }

    /// Build a descriptor, preferring the manifest override over the default entry
    pub fn from_manifest(
        name: String,
        directory: PathBuf,
        override_entry: Option<&str>,
        default_entry: Option<&str>,
    ) -> Self {
        let source_entry = match (override_entry, default_entry) {
            (Some(path), _) => Some(SourceEntry::new(path, EntryOrigin::Manifest)),
            (None, Some(path)) => Some(SourceEntry::new(path, EntryOrigin::Default)),
            (None, None) => None,
        };
        Self::new(name, directory, source_entry)
    }

    /// Source entry that can actually be used for a rewrite
    pub fn usable_entry(&self) -> Option<&str> {
        self.source_entry
            .as_ref()
            .map(|entry| entry.path.trim())
            .filter(|path| !path.is_empty())
    }

    /// Absolute path of the source entry (`directory` + `source_entry`)
    ///
    /// The entry is always taken relative to `directory`; a leading root in
    /// the entry is dropped rather than replacing the directory.
    pub fn entry_path(&self) -> Option<PathBuf> {
        self.usable_entry().map(|entry| {
            let relative: PathBuf = Path::new(entry)
                .components()
                .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
                .collect();
            normalize_path(&self.directory.join(relative))
        })
    }
}

impl SourceEntry {
    pub fn new(path: impl Into<String>, origin: EntryOrigin) -> Self {
        Self {
            path: path.into(),
            origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_prefers_manifest_override() {
        let pkg = PackageDescriptor::from_manifest(
            "@test/utils".to_string(),
            PathBuf::from("/repo/packages/utils"),
            Some("./lib/main.ts"),
            Some("./src/index.ts"),
        );

        let entry = pkg.source_entry.as_ref().unwrap();
        assert_eq!(entry.path, "./lib/main.ts");
        assert_eq!(entry.origin, EntryOrigin::Manifest);
        assert_eq!(
            pkg.entry_path(),
            Some(PathBuf::from("/repo/packages/utils/lib/main.ts"))
        );
    }

    #[test]
    fn test_descriptor_default_entry() {
        let pkg = PackageDescriptor::from_manifest(
            "utils".to_string(),
            PathBuf::from("/repo/utils"),
            None,
            Some("./src/index.ts"),
        );

        assert_eq!(pkg.source_entry.as_ref().unwrap().origin, EntryOrigin::Default);
        assert_eq!(pkg.entry_path(), Some(PathBuf::from("/repo/utils/src/index.ts")));
    }

    #[test]
    fn test_descriptor_without_usable_entry() {
        let pkg = PackageDescriptor::from_manifest(
            "utils".to_string(),
            PathBuf::from("/repo/utils"),
            None,
            None,
        );
        assert_eq!(pkg.usable_entry(), None);
        assert_eq!(pkg.entry_path(), None);

        let blank = PackageDescriptor::new(
            "utils".to_string(),
            PathBuf::from("/repo/utils"),
            Some(SourceEntry::new("  ", EntryOrigin::Manifest)),
        );
        assert_eq!(blank.entry_path(), None);
    }

    #[test]
    fn test_entry_path_resolves_parent_segments() {
        let pkg = PackageDescriptor::from_manifest(
            "shared".to_string(),
            PathBuf::from("/repo/packages/shared"),
            Some("../common/src/index.ts"),
            None,
        );
        assert_eq!(
            pkg.entry_path(),
            Some(PathBuf::from("/repo/packages/common/src/index.ts"))
        );
    }

    #[test]
    fn test_absolute_entry_stays_inside_directory() {
        let pkg = PackageDescriptor::from_manifest(
            "utils".to_string(),
            PathBuf::from("/repo/utils"),
            Some("/src/index.ts"),
            None,
        );
        assert_eq!(pkg.entry_path(), Some(PathBuf::from("/repo/utils/src/index.ts")));
    }
}

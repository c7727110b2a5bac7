//! Name to package mapping built by discovery

use indexmap::IndexMap;
use mono_core::types::PackageDescriptor;
use tracing::debug;

/// Insertion-ordered mapping from package name to descriptor
///
/// Order is discovery order. The first registration of a name wins; only
/// [`DiscoveryMapping::override_with`] replaces an existing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryMapping {
    packages: IndexMap<String, PackageDescriptor>,
}

impl DiscoveryMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor unless its name is already taken
    pub fn register(&mut self, descriptor: PackageDescriptor) -> bool {
        if let Some(existing) = self.packages.get(&descriptor.name) {
            debug!(
                "Ignoring {} in {}: already registered from {}",
                descriptor.name,
                descriptor.directory.display(),
                existing.directory.display()
            );
            return false;
        }

        debug!("Registered {} -> {}", descriptor.name, descriptor.directory.display());
        self.packages.insert(descriptor.name.clone(), descriptor);
        true
    }

    /// Insert a descriptor, replacing any existing one with the same name
    pub fn override_with(&mut self, descriptor: PackageDescriptor) -> Option<PackageDescriptor> {
        self.packages.insert(descriptor.name.clone(), descriptor)
    }

    pub fn get(&self, name: &str) -> Option<&PackageDescriptor> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageDescriptor> {
        self.packages.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// `name -> absolute source entry` for every package with a usable entry
    pub fn entry_table(&self) -> IndexMap<String, String> {
        self.packages
            .values()
            .filter_map(|pkg| {
                pkg.entry_path()
                    .map(|path| (pkg.name.clone(), path.to_string_lossy().into_owned()))
            })
            .collect()
    }
}

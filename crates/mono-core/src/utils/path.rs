//! Path utilities for discovery.
//!
//! Provides lexical normalization and the directory-name filters shared by the
//! pattern expander and the full-tree walk.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Dependency cache directory that discovery never descends into
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// Normalize a path by resolving . and .. components
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {
                // Skip current directory
            },
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                },
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {},
                _ => components.push(component),
            },
            other => {
                components.push(other);
            },
        }
    }

    components.iter().collect()
}

/// Make `path` absolute against `base` and normalize it
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base.join(path))
    }
}

/// Check if a directory name is the dependency cache
pub fn is_dependency_cache(name: &OsStr) -> bool {
    name == DEPENDENCY_CACHE_DIR
}

/// Check if a directory name starts with the hidden-file marker
pub fn is_hidden(name: &OsStr) -> bool {
    name.to_str().map(|n| n.starts_with('.')).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("./src/../lib/./file.rs");
        let normalized = normalize_path(path);
        assert_eq!(normalized, Path::new("lib/file.rs"));
    }

    #[test]
    fn test_normalize_absolute_path() {
        assert_eq!(
            normalize_path(Path::new("/repo/packages/utils/./src/index.ts")),
            Path::new("/repo/packages/utils/src/index.ts")
        );
        assert_eq!(normalize_path(Path::new("/repo/../..")), Path::new("/"));
        assert_eq!(normalize_path(Path::new("../a")), Path::new("../a"));
    }

    #[test]
    fn test_absolutize() {
        let base = Path::new("/home/user/project");
        assert_eq!(
            absolutize(base, Path::new("packages/app")),
            Path::new("/home/user/project/packages/app")
        );
        assert_eq!(absolutize(base, Path::new("/opt/x/../y")), Path::new("/opt/y"));
        assert_eq!(absolutize(base, Path::new("..")), Path::new("/home/user"));
    }

    #[test]
    fn test_directory_filters() {
        assert!(is_dependency_cache(OsStr::new("node_modules")));
        assert!(!is_dependency_cache(OsStr::new("node_modules_backup")));
        assert!(is_hidden(OsStr::new(".git")));
        assert!(is_hidden(OsStr::new(".mono")));
        assert!(!is_hidden(OsStr::new("packages")));
    }
}

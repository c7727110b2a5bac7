//! Workspace pattern expansion
//!
//! Supports the three pattern shapes found in `workspaces` arrays:
//! `dir/*` (immediate children), `dir/**` (every descendant, pre-order) and a
//! literal relative path. Results are sorted by file name so that expansion of
//! an unchanged tree is stable.

use mono_core::utils::{is_dependency_cache, is_hidden, normalize_path};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Expand `pattern` against `base` into candidate package directories
pub fn expand(base: &Path, pattern: &str) -> Vec<PathBuf> {
    let dirs = if let Some(prefix) = strip_glob(pattern, "**") {
        descendants(&join_prefix(base, prefix))
    } else if let Some(prefix) = strip_glob(pattern, "*") {
        children(&join_prefix(base, prefix))
    } else {
        literal(base, pattern)
    };

    debug!("Pattern '{}' in {} matched {} directories", pattern, base.display(), dirs.len());
    dirs
}

/// Strip a trailing `/<glob>`; a bare `<glob>` means the base itself
fn strip_glob<'a>(pattern: &'a str, glob: &str) -> Option<&'a str> {
    if pattern == glob {
        return Some("");
    }
    pattern.strip_suffix(glob)?.strip_suffix('/')
}

fn join_prefix(base: &Path, prefix: &str) -> PathBuf {
    if prefix.is_empty() {
        normalize_path(base)
    } else {
        normalize_path(&base.join(prefix))
    }
}

/// Immediate subdirectories, skipping the dependency cache
fn children(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(readable)
        .filter(|entry| entry.file_type().is_dir() && !is_dependency_cache(entry.file_name()))
        .map(DirEntry::into_path)
        .collect()
}

/// Every descendant directory in pre-order, skipping dependency caches and hidden dirs
fn descendants(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry))
        .filter_map(readable)
        .filter(|entry| entry.file_type().is_dir())
        .map(DirEntry::into_path)
        .collect()
}

fn literal(base: &Path, pattern: &str) -> Vec<PathBuf> {
    let dir = normalize_path(&base.join(pattern));
    if dir.is_dir() {
        vec![dir]
    } else {
        Vec::new()
    }
}

pub(crate) fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && (is_dependency_cache(entry.file_name()) || is_hidden(entry.file_name()))
}

/// Log and drop traversal errors; the unreadable subtree counts as empty
pub(crate) fn readable(entry: walkdir::Result<DirEntry>) -> Option<DirEntry> {
    match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
            debug!("Skipping unreadable path: {}", e);
            None
        },
    }
}

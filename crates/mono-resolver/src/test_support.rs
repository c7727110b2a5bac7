//! Filesystem fixtures for discovery tests

use mono_config::MANIFEST_FILE;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary project tree
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    /// Root of the fixture (canonicalized so it compares equal to walked paths)
    pub fn root(&self) -> PathBuf {
        self.dir.path().canonicalize().expect("Failed to canonicalize temp directory")
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let dir = self.path(relative);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write `package.json` into `relative` (created if needed)
    pub fn manifest(&self, relative: &str, json: &str) -> PathBuf {
        let dir = self.mkdir(relative);
        fs::write(dir.join(MANIFEST_FILE), json).unwrap();
        dir
    }

    /// Write an arbitrary file, creating parents
    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

pub fn names(paths: &[PathBuf], base: &Path) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.strip_prefix(base).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

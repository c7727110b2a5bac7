//! Diagnostic mapping artifact
//!
//! After a full-tree discovery the final `name -> absolute source entry` table
//! is written to `<cwd>/.mono/mapping.json` for inspection. The file is
//! output only; nothing reads it back.

use crate::mapping::DiscoveryMapping;
use mono_core::error::{MonoError, MonoResult};
use std::fs;
use std::path::Path;

/// Write the mapping table to `path`, creating the parent directory
pub fn write_artifact(path: &Path, mapping: &DiscoveryMapping) -> MonoResult<()> {
    let write_error = |source: std::io::Error| MonoError::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut content = serde_json::to_string_pretty(&mapping.entry_table())
        .map_err(|e| write_error(e.into()))?;
    content.push('\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, content).map_err(write_error)
}

//! package.json reading for discovery
//!
//! Only the fields discovery cares about are modelled; everything else in the
//! manifest is ignored. Reading never fails outward: the outcome is a
//! [`ManifestRead`] so callers can tell "missing" from "unreadable".

use crate::ConfigResult;
use mono_core::error::MonoError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use tracing::debug;

/// Manifest file name
pub const MANIFEST_FILE: &str = "package.json";

/// The subset of package.json used by discovery
///
/// A field holding a value of an unexpected type reads as absent instead of
/// rejecting the whole manifest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageJson {
    /// Package name (required for registration)
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    /// Workspace configuration
    #[serde(default, deserialize_with = "lenient")]
    pub workspaces: Option<WorkspacesConfig>,

    /// Source entry override; only a string value counts
    #[serde(default)]
    pub monorepo: Option<serde_json::Value>,
}

/// Workspace configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WorkspacesConfig {
    /// Simple array of workspace patterns
    Simple(Vec<String>),
    /// Detailed workspace configuration
    Detailed {
        #[serde(default)]
        packages: Vec<String>,
        #[serde(default)]
        nohoist: Vec<String>,
    },
}

/// Outcome of reading a directory's manifest
#[derive(Debug)]
pub enum ManifestRead {
    /// Manifest present and parsed
    Found(PackageJson),
    /// No manifest in the directory
    Missing,
    /// Manifest present but unreadable or not valid JSON
    Invalid(MonoError),
}

impl PackageJson {
    /// Non-empty package name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Workspace patterns from either workspaces form
    pub fn workspace_patterns(&self) -> &[String] {
        match &self.workspaces {
            Some(WorkspacesConfig::Simple(patterns)) => patterns,
            Some(WorkspacesConfig::Detailed { packages, .. }) => packages,
            None => &[],
        }
    }

    /// Check if the manifest declares at least one workspace pattern
    pub fn declares_workspaces(&self) -> bool {
        !self.workspace_patterns().is_empty()
    }

    /// Explicit source entry override, if it is a string
    pub fn monorepo_entry(&self) -> Option<&str> {
        self.monorepo.as_ref().and_then(|value| value.as_str())
    }
}

impl ManifestRead {
    /// Parsed manifest, discarding the reason when there is none
    pub fn found(self) -> Option<PackageJson> {
        match self {
            ManifestRead::Found(manifest) => Some(manifest),
            ManifestRead::Missing | ManifestRead::Invalid(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ManifestRead::Missing)
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Parse manifest content read from `path`
pub fn parse_manifest(path: &Path, content: &str) -> ConfigResult<PackageJson> {
    serde_json::from_str(content).map_err(|e| MonoError::ManifestParse {
        path: path.to_path_buf(),
        message: format!("JSON parsing error: {}", e),
    })
}

/// Read and parse the manifest in `dir`
pub fn read_manifest(dir: &Path) -> ManifestRead {
    let path = dir.join(MANIFEST_FILE);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return ManifestRead::Missing,
        Err(e) => {
            debug!("Skipping unreadable manifest {}: {}", path.display(), e);
            return ManifestRead::Invalid(MonoError::io(
                format!("Failed to read {}", path.display()),
                e,
            ));
        },
    };

    match parse_manifest(&path, &content) {
        Ok(manifest) => ManifestRead::Found(manifest),
        Err(e) => {
            debug!("Skipping invalid manifest: {}", e);
            ManifestRead::Invalid(e)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal_manifest() {
        let json = r#"{ "name": "test-package", "version": "1.0.0" }"#;

        let manifest = parse_manifest(Path::new("package.json"), json).unwrap();
        assert_eq!(manifest.name(), Some("test-package"));
        assert!(!manifest.declares_workspaces());
        assert_eq!(manifest.monorepo_entry(), None);
    }

    #[test]
    fn test_parse_workspaces_forms() {
        let simple = r#"{ "workspaces": ["packages/*", "apps/**"] }"#;
        let manifest = parse_manifest(Path::new("package.json"), simple).unwrap();
        assert_eq!(manifest.workspace_patterns(), ["packages/*", "apps/**"]);
        assert!(manifest.declares_workspaces());

        let detailed = r#"{ "workspaces": { "packages": ["libs/*"], "nohoist": ["**/react"] } }"#;
        let manifest = parse_manifest(Path::new("package.json"), detailed).unwrap();
        assert_eq!(manifest.workspace_patterns(), ["libs/*"]);

        let empty = r#"{ "workspaces": [] }"#;
        let manifest = parse_manifest(Path::new("package.json"), empty).unwrap();
        assert!(!manifest.declares_workspaces());

        let nohoist_only = r#"{ "workspaces": { "nohoist": ["x"] } }"#;
        let manifest = parse_manifest(Path::new("package.json"), nohoist_only).unwrap();
        assert!(!manifest.declares_workspaces());
    }

    #[test]
    fn test_monorepo_entry_must_be_string() {
        let json = r#"{ "name": "@test/utils", "monorepo": "./src/index.ts" }"#;
        let manifest = parse_manifest(Path::new("package.json"), json).unwrap();
        assert_eq!(manifest.monorepo_entry(), Some("./src/index.ts"));

        let json = r#"{ "name": "@test/utils", "monorepo": true }"#;
        let manifest = parse_manifest(Path::new("package.json"), json).unwrap();
        assert_eq!(manifest.monorepo_entry(), None);
    }

    #[test]
    fn test_unexpected_field_types_are_tolerated() {
        let json = r#"{ "name": "a", "version": 2, "private": "yes" }"#;
        let manifest = parse_manifest(Path::new("package.json"), json).unwrap();
        assert_eq!(manifest.name(), Some("a"));

        let json = r#"{ "name": "b", "workspaces": "packages/*" }"#;
        let manifest = parse_manifest(Path::new("package.json"), json).unwrap();
        assert_eq!(manifest.name(), Some("b"));
        assert!(!manifest.declares_workspaces());

        let json = r#"{ "name": 7, "workspaces": { "packages": "libs/*" } }"#;
        let manifest = parse_manifest(Path::new("package.json"), json).unwrap();
        assert_eq!(manifest.name(), None);
        assert!(!manifest.declares_workspaces());

        let json = r#"{ "name": null, "workspaces": ["apps/*"] }"#;
        let manifest = parse_manifest(Path::new("package.json"), json).unwrap();
        assert_eq!(manifest.name(), None);
        assert_eq!(manifest.workspace_patterns(), ["apps/*"]);
    }

    #[test]
    fn test_empty_name_is_absent() {
        let manifest = parse_manifest(Path::new("package.json"), r#"{ "name": "" }"#).unwrap();
        assert_eq!(manifest.name(), None);
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse_manifest(Path::new("/repo/package.json"), "{ not json").unwrap_err();
        assert!(matches!(err, MonoError::ManifestParse { .. }));
        assert!(err.to_string().contains("/repo/package.json"));
    }

    #[test]
    fn test_read_manifest_outcomes() {
        let temp_dir = TempDir::new().unwrap();

        assert!(read_manifest(temp_dir.path()).is_missing());

        std::fs::write(temp_dir.path().join(MANIFEST_FILE), "{ broken").unwrap();
        assert!(matches!(read_manifest(temp_dir.path()), ManifestRead::Invalid(_)));

        let odd = temp_dir.path().join("odd");
        std::fs::create_dir_all(odd.join(MANIFEST_FILE)).unwrap();
        assert!(matches!(read_manifest(&odd), ManifestRead::Invalid(MonoError::Io { .. })));

        std::fs::write(temp_dir.path().join(MANIFEST_FILE), r#"{ "name": "ok" }"#).unwrap();
        let manifest = read_manifest(temp_dir.path()).found().unwrap();
        assert_eq!(manifest.name(), Some("ok"));
    }
}

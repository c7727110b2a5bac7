//! Session settings, environment overrides, and layering

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use mono_core::error::MonoError;
use mono_core::utils::absolutize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::ConfigResult;

/// Source entry used when a manifest has no `monorepo` override
pub const DEFAULT_SOURCE_ENTRY: &str = "./src/index.ts";

/// Directory under the working directory that holds generated files
pub const ARTIFACT_DIR: &str = ".mono";

/// Mapping artifact file name inside [`ARTIFACT_DIR`]
pub const ARTIFACT_FILE: &str = "mapping.json";

/// Discovery strategy used to enumerate local packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryStrategy {
    /// Walk up collecting workspace roots, expand their patterns (nearest root wins)
    Workspaces,
    /// Find the outermost marked root, walk the whole tree (ancestor wins)
    FullTree,
}

/// Settings for one resolution session
#[derive(Debug, Clone, PartialEq)]
pub struct MonoSettings {
    /// Working directory discovery starts from
    pub cwd: Utf8PathBuf,
    /// Enumeration strategy
    pub strategy: DiscoveryStrategy,
    /// Default source entry; `None` disables the convention
    pub default_entry: Option<String>,
    /// Verbose discovery logging
    pub debug: bool,
    /// Write the diagnostic mapping artifact (full-tree only)
    pub write_artifact: bool,
    /// Upward discovery stops at this directory (inclusive)
    pub ceiling: Option<Utf8PathBuf>,
    /// Extra name -> entry mappings, entries relative to `cwd`
    pub extra_packages: IndexMap<String, String>,
}

/// Configuration layering: defaults, then environment, then explicit calls
pub struct ConfigLayering;

impl DiscoveryStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryStrategy::Workspaces => "workspaces",
            DiscoveryStrategy::FullTree => "tree",
        }
    }
}

impl fmt::Display for DiscoveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscoveryStrategy {
    type Err = MonoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "workspaces" | "workspace" | "chain" => Ok(DiscoveryStrategy::Workspaces),
            "tree" | "full-tree" | "fulltree" => Ok(DiscoveryStrategy::FullTree),
            other => Err(MonoError::config(
                "strategy",
                format!("unknown strategy '{}', expected 'workspaces' or 'tree'", other),
            )),
        }
    }
}

impl MonoSettings {
    /// Create settings with defaults for the given strategy
    pub fn new(cwd: Utf8PathBuf, strategy: DiscoveryStrategy) -> Self {
        Self {
            cwd,
            strategy,
            default_entry: Some(DEFAULT_SOURCE_ENTRY.to_string()),
            debug: false,
            write_artifact: true,
            ceiling: None,
            extra_packages: IndexMap::new(),
        }
    }

    /// Settings for the process working directory with `MONO_*` overrides applied
    pub fn from_env(strategy: DiscoveryStrategy) -> ConfigResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| MonoError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|path| {
            MonoError::config(
                "cwd",
                format!("working directory is not valid UTF-8: {}", path.display()),
            )
        })?;

        let mut settings = Self::new(cwd, strategy);
        ConfigLayering::apply_env_overrides(&mut settings, &ConfigLayering::collect_env_overrides())?;
        Ok(settings)
    }

    pub fn with_strategy(mut self, strategy: DiscoveryStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_default_entry(mut self, entry: Option<String>) -> Self {
        self.default_entry = entry;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_artifact(mut self, write_artifact: bool) -> Self {
        self.write_artifact = write_artifact;
        self
    }

    pub fn with_ceiling(mut self, ceiling: impl Into<Utf8PathBuf>) -> Self {
        self.ceiling = Some(ceiling.into());
        self
    }

    /// Add an extra package mapping; later calls replace earlier ones
    pub fn with_extra_package(mut self, name: impl Into<String>, entry: impl Into<String>) -> Self {
        self.extra_packages.insert(name.into(), entry.into());
        self
    }

    /// Default entry, treating an empty value as disabled
    pub fn default_entry(&self) -> Option<&str> {
        self.default_entry.as_deref().filter(|entry| !entry.is_empty())
    }

    /// Location of the diagnostic mapping artifact
    pub fn artifact_path(&self) -> Utf8PathBuf {
        self.cwd.join(ARTIFACT_DIR).join(ARTIFACT_FILE)
    }
}

impl ConfigLayering {
    /// Collect `MONO_*` environment variables
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with("MONO_"))
            .collect()
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(
        settings: &mut MonoSettings,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "MONO_DEBUG" => {
                    settings.debug = parse_flag(key, value)?;
                },
                "MONO_STRATEGY" => {
                    settings.strategy = value.parse().map_err(|_| {
                        MonoError::config(
                            key.as_str(),
                            format!("unknown strategy '{}', expected 'workspaces' or 'tree'", value),
                        )
                    })?;
                },
                "MONO_DEFAULT_ENTRY" => {
                    settings.default_entry = Some(value.clone()).filter(|entry| !entry.is_empty());
                },
                "MONO_ARTIFACT" => {
                    settings.write_artifact = parse_flag(key, value)?;
                },
                "MONO_CEILING_DIR" => {
                    settings.ceiling = Some(resolve_against(&settings.cwd, value, key)?);
                },
                _ => {
                    // Unknown environment variable, ignore
                },
            }
        }

        Ok(())
    }
}

fn parse_flag(field: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(MonoError::config(
            field,
            format!("expected a boolean flag, got '{}'", other),
        )),
    }
}

fn resolve_against(cwd: &Utf8Path, value: &str, field: &str) -> ConfigResult<Utf8PathBuf> {
    let resolved = absolutize(cwd.as_std_path(), std::path::Path::new(value));
    Utf8PathBuf::from_path_buf(resolved)
        .map_err(|path| MonoError::config(field, format!("path is not valid UTF-8: {}", path.display())))
}

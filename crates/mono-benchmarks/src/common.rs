//! Common utilities for benchmarks

use camino::Utf8PathBuf;
use criterion::Criterion;
use mono_config::{DiscoveryStrategy, MonoSettings, MANIFEST_FILE};
use pprof::criterion::{Output, PProfProfiler};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Generated monorepo on disk
///
/// Layout: a `.git` marked root declaring `packages/*` and `apps/**`,
/// `packages` flat packages and `apps` apps each nesting one module, plus a
/// populated `node_modules` that discovery has to skip.
pub struct Monorepo {
    dir: TempDir,
}

impl Monorepo {
    pub fn generate(packages: usize, apps: usize) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let root = dir.path();

        fs::create_dir_all(root.join(".git")).unwrap();
        write_manifest(root, r#"{ "name": "bench-root", "workspaces": ["packages/*", "apps/**"] }"#);

        for i in 0..packages {
            let pkg = root.join("packages").join(format!("pkg-{:04}", i));
            write_manifest(
                &pkg,
                &format!(r#"{{ "name": "@bench/pkg-{:04}", "monorepo": "./src/index.ts" }}"#, i),
            );
            fs::create_dir_all(pkg.join("src")).unwrap();
            fs::write(pkg.join("src/index.ts"), "export {};\n").unwrap();
        }

        for i in 0..apps {
            let app = root.join("apps").join(format!("app-{:03}", i));
            write_manifest(&app, &format!(r#"{{ "name": "app-{:03}" }}"#, i));
            write_manifest(
                &app.join("modules/core"),
                &format!(r#"{{ "name": "app-{:03}-core" }}"#, i),
            );
        }

        for i in 0..packages.min(50) {
            write_manifest(
                &root.join("node_modules").join(format!("dep-{}", i)),
                &format!(r#"{{ "name": "dep-{}" }}"#, i),
            );
        }

        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Settings rooted at the first package, bounded by the generated root
    pub fn settings(&self, strategy: DiscoveryStrategy) -> MonoSettings {
        let root = Utf8PathBuf::from_path_buf(self.root().to_path_buf()).expect("temp path is UTF-8");
        MonoSettings::new(root.join("packages").join("pkg-0000"), strategy)
            .with_ceiling(root)
            .with_artifact(false)
    }
}

fn write_manifest(dir: &Path, json: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(MANIFEST_FILE), json).unwrap();
}

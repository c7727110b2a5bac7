//! Mono benchmarking suite
//!
//! Benchmarks for package discovery over generated monorepos and for the
//! per-query resolution path.

pub mod common;

pub use common::*;

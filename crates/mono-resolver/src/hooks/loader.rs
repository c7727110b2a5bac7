//! Module loader resolve hook

use super::{HookResolution, ResolveContext};
use crate::logging::init_logging;
use crate::session::{ResolutionResult, Session};
use mono_config::DiscoveryStrategy;
use mono_core::error::MonoResult;
use std::future::Future;
use std::sync::Arc;

/// Resolve hook for a module loader, backed by workspace discovery
#[derive(Debug, Clone)]
pub struct LoaderHook {
    session: Arc<Session>,
}

impl LoaderHook {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Hook for the process working directory, workspace strategy unless
    /// `MONO_STRATEGY` says otherwise
    pub fn from_env() -> MonoResult<Self> {
        let session = Session::from_env(DiscoveryStrategy::Workspaces)?;
        init_logging(session.settings().debug);
        Ok(Self::new(Arc::new(session)))
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Resolve `specifier`, calling `next` for everything that is not a
    /// local package main entry
    pub async fn resolve<F, Fut>(
        &self,
        specifier: &str,
        context: &ResolveContext,
        next: F,
    ) -> MonoResult<HookResolution>
    where
        F: FnOnce(&str, &ResolveContext) -> Fut,
        Fut: Future<Output = MonoResult<HookResolution>>,
    {
        match self.session.resolve(specifier, |spec| next(spec, context)).await? {
            ResolutionResult::ShortCircuit(path) => HookResolution::short_circuit(&path),
            ResolutionResult::Delegated(resolution) => resolution,
        }
    }
}

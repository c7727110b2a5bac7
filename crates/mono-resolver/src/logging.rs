//! Logging setup for the host integrations

/// Install the global `tracing` subscriber
///
/// `debug` raises the discovery crates to `debug`, otherwise only warnings
/// are printed. Returns `false` when a subscriber is already installed,
/// which happens when both integrations run in one process.
pub fn init_logging(debug: bool) -> bool {
    let level = if debug { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(format!("mono_resolver={},mono_config={}", level, level))
        .with_target(false)
        .try_init()
        .is_ok()
}

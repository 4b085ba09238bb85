use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber. Verbosity is controlled by
/// `RUST_LOG`, defaulting to `info` when unset.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

use tracing_subscriber::EnvFilter;

/// Installs the stderr `fmt` subscriber, filtered by `RUST_LOG` (default `warn`).
/// Later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

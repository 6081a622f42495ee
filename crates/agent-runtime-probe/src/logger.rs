use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Initializes console logging once per process.
///
/// The filter comes from `AGENT_PROBE_LOG`, then `RUST_LOG`, then `info`.
/// Logs go to stderr: stdout is reserved for streamed content and banners.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(resolve_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn resolve_filter() -> EnvFilter {
    if let Ok(level) = std::env::var("AGENT_PROBE_LOG")
        && let Ok(filter) = EnvFilter::try_new(level)
    {
        return filter;
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

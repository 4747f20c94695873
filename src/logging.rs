use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "attendifyd=info";

/// Installs the global subscriber. Output goes to stderr; stdout belongs to
/// the request/response stream. `RUST_LOG` overrides the default filter.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! Tracing setup for the agent binary.

/// Initialize the global tracing subscriber. Respects `RUST_LOG`, defaulting
/// to `info`. Call once, from the binary entry point.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber.
///
/// The filter comes from `RUST_LOG`, then `LOG_LEVEL`, then defaults to
/// `info`. Later calls are no-ops.
pub fn init() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .try_init();
}

use revdns_domain::Config;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries only the result table. `RUST_LOG`
/// takes precedence over the configured level.
pub fn init_logging(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `server.log_level`. Production emits JSON lines;
/// everything else uses the human-readable format. Logs go to stderr so
/// they never mix with console output.
pub fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

pub mod algorithm;
pub mod config;
pub mod input;
pub mod line_diff;
pub mod output;
pub mod patch;
pub mod validate;

use tracing_subscriber::EnvFilter;

/// Logs to stderr, filtered by `RUST_LOG` (warnings and errors by default).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

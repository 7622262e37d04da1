//! Logging Infrastructure
//!
//! tracing-subscriber fmt setup, with optional daily-rolling file output.

use crate::core::Config;

/// Initialize the logger from the config. RUST_LOG takes precedence over
/// the configured level.
pub fn init(config: &Config) {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if config.log_to_file {
        let log_dir = config.log_dir();
        if log_dir.exists()
            && let Some(dir_str) = log_dir.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "entrega-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}

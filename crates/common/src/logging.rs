//! Logging and tracing initialization.

use std::path::Path;

use crate::config::LoggingConfig;

/// Initialize the tracing subscriber with the given configuration.
///
/// Safe to call more than once; later calls keep the first subscriber.
/// When a log file is configured it receives plain-format output; if the
/// file cannot be opened, logging falls back to stderr.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::fmt;

    if let Some(path) = &config.file {
        match open_log_file(path) {
            Ok(file) => {
                let subscriber = fmt::Subscriber::builder()
                    .with_env_filter(env_filter(&config.level))
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file))
                    .finish();
                tracing::subscriber::set_global_default(subscriber).ok();
                return;
            }
            Err(e) => {
                eprintln!("panelsplit: cannot open log file {}: {e}", path.display());
            }
        }
    }

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter(&config.level))
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter(&config.level))
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

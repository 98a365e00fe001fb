use crate::config::LoggingConfig;
use crate::constants::LOG_FILE_NAME;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize the logging system from the logging configuration.
/// Logs always go to stdout; when `config.file` is set they are also written
/// to daily rotating files under `config.directory`.
///
/// # Arguments
///
/// * `config` - Level filter, file toggle and log directory
pub fn init_logging(config: &LoggingConfig) {
    let filter = match EnvFilter::try_new(&config.level) {
        Ok(f) => f,
        Err(_) => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", config.level);
            EnvFilter::new("info")
        }
    };

    let stdout_layer = fmt::layer().with_line_number(true).with_file(config.file);

    if config.file {
        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, &config.directory, LOG_FILE_NAME);

        let file_layer = fmt::layer()
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(stdout_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stdout_layer)
            .init();
    }
}

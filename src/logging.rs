use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "rich-text-editor.log";
const DEFAULT_FILTER: &str = "info,rich_text_editor=debug";

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Log file only. The terminal front-end owns stdout.
    File,
    /// Log file and stdout
    FileAndStdout,
}

/// Install the global subscriber. Keep the returned guard alive for the
/// life of the program so buffered lines are flushed.
pub fn init(output: LogOutput) -> Option<WorkerGuard> {
    let logs_dir = Path::new(LOG_DIR);
    if std::fs::create_dir_all(logs_dir).is_err() {
        eprintln!("Failed to create logs directory");
        return None;
    }

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // No ANSI colors in the file
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let stdout_layer = (output == LogOutput::FileAndStdout).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
            .with_level(true)
    });

    // RUST_LOG overrides the default levels
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .is_err()
    {
        eprintln!("A global tracing subscriber is already installed");
        return None;
    }

    Some(guard)
}

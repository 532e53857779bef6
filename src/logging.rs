use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "dashboard.log";

/// Console plus daily JSON file output under `logs/`.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes buffered file output.
pub fn init_logging() -> WorkerGuard {
    init_logging_in(Path::new(LOG_DIR))
}

pub fn init_logging_in(dir: &Path) -> WorkerGuard {
    if let Err(e) = fs::create_dir_all(dir) {
        eprintln!("Cannot create log directory {}: {}", dir.display(), e);
    }

    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stdout);

    // RUST_LOG wins; otherwise debug for this crate, info for dependencies
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cireta_dashboard=debug,dashboard=debug,info"));

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
    {
        eprintln!("Logging already initialized: {}", e);
    }

    guard
}

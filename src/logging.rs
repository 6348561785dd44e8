use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MAZEGEN_LOG=mazegen=trace`.
pub const LOG_ENV: &str = "MAZEGEN_LOG";

/// Routes `tracing` output to `file_name` in the working directory.
///
/// The terminal is reserved for the rendered maze, so nothing is logged to stdout.
/// Keep the returned guard alive until exit, dropping it flushes pending lines.
pub fn init(file_name: &str) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    guard
}

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Log directory: `~/.cache/reva/logs/`, created if missing.
pub fn log_dir() -> Option<PathBuf> {
    let dir = dirs::cache_dir()?.join("reva").join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Route tracing output to a daily-rotated file. Keep the returned guard alive until exit so buffered lines are
/// flushed. Returns `None` (no logging) when no cache dir is available.
pub fn init() -> Option<WorkerGuard> {
    let dir = log_dir()?;
    let appender = tracing_appender::rolling::daily(&dir, "reva-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .ok()?;
    tracing::info!(
        started = %chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        dir = %dir.display(),
        "reva-tui logging initialised"
    );
    Some(guard)
}

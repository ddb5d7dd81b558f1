use std::fs;
use std::path::Path;

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Sends logs to `path`. The terminal belongs to the UI, so when the file
/// cannot be set up nothing is logged at all.
pub fn init_logging(path: Option<&Path>, verbose: u8) -> Option<WorkerGuard> {
    let path = path?;
    let dir = path.parent().filter(|dir| !dir.as_os_str().is_empty())?;
    let file_name = path.file_name()?;
    fs::create_dir_all(dir).ok()?;

    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var("BREWDECK_LOG")
        .from_env_lossy();

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}

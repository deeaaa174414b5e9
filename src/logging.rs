//! File-backed logging.
//!
//! The radar owns the terminal in raw mode, so log output never goes to
//! stdout/stderr while it runs. Everything is written to a log file that is
//! truncated at the start of each session. `RUST_LOG` controls the filter.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the background log writer alive; dropping it flushes the file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Default log file: `<cache dir>/adsb-radar/adsb-radar.log`
pub fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("adsb-radar")
        .join("adsb-radar.log")
}

/// Initialize the global subscriber writing to `log_file`
pub fn init_logging(log_file: &Path) -> io::Result<LoggingGuard> {
    let dir = log_file.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let name = log_file
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log path has no file name"))?;

    fs::create_dir_all(dir)?;
    fs::write(log_file, "")?;

    let file_appender = tracing_appender::rolling::never(dir, name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

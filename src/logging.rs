//! Log setup
//!
//! stdout carries the report, so diagnostics go to a log file.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "npm_stale=info";

/// Initialize file logging at `log_file`, creating its directory if needed.
///
/// The returned guard flushes buffered events on drop and must be held for
/// the life of the program. `RUST_LOG` overrides the default filter.
pub fn init(log_file: &Path) -> std::io::Result<WorkerGuard> {
    let (dir, file_name) = split_log_path(log_file);
    std::fs::create_dir_all(&dir)?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn split_log_path(log_file: &Path) -> (PathBuf, String) {
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let file_name = log_file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("npm-stale.log")
        .to_string();

    (dir, file_name)
}

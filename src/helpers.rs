use crate::error::QlogError;
use crate::scanner::ReaderSource;
use std::fs::File;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Env var holding a tracing filter directive, e.g. `QLOG_LOG=qlog_tools=trace`.
pub const LOG_ENV: &str = "QLOG_LOG";

/// Level used when `QLOG_LOG` is unset; each `-v` raises it one step.
pub fn level_for(verbosity: u64) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr logger. Stdout is left alone for the results.
pub fn init_logging(verbosity: u64) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Open a log file as a byte source.
pub fn open_log(path: &Path) -> Result<ReaderSource<File>, QlogError> {
    let file = File::open(path).map_err(|source| QlogError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ReaderSource::new(file))
}

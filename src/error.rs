use std::io;
use std::path::PathBuf;

/// Hard failures. Anything wrong inside the log itself is skipped, never reported.
#[derive(Debug, thiserror::Error)]
pub enum QlogError {
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read input")]
    Read(#[source] io::Error),

    #[error("failed to write output")]
    Write(#[from] io::Error),

    #[error("unknown output format '{0}'")]
    Format(String),
}

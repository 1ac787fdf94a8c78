use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file: {0}")]
    Io(#[from] io::Error),
    #[error("a global logger is already installed: {0}")]
    AlreadyInitialized(String),
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Logs to `path`, appending. Used while the terminal host owns the screen.
pub fn init_file(path: &Path) -> Result<(), LoggingError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| LoggingError::AlreadyInitialized(err.to_string()))
}

/// Logs to stderr for one-shot commands.
pub fn init_stderr() -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| LoggingError::AlreadyInitialized(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{LoggingError, init_file, init_stderr};

    #[test]
    fn second_install_is_reported() {
        let _ = init_stderr();
        assert!(matches!(init_stderr(), Err(LoggingError::AlreadyInitialized(_))));

        let dir = tempfile::tempdir().expect("tempdir");
        let err = init_file(&dir.path().join("forms.log")).expect_err("already installed");
        assert!(matches!(err, LoggingError::AlreadyInitialized(_)));
        assert!(dir.path().join("forms.log").exists());
    }

    #[test]
    fn unopenable_log_file_is_an_io_error() {
        let err = init_file(std::path::Path::new("/nonexistent/dir/forms.log"))
            .expect_err("missing dir");
        assert!(matches!(err, LoggingError::Io(_)));
    }
}

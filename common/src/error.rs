use camino::{Utf8Path, Utf8PathBuf};
use std::io;
use thiserror::Error;

/// Everything that can go wrong while managing the backup store. None of these are fatal: the
/// caller reports them and carries on.
///
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("live save '{0}' not found")]
    SourceMissing(Utf8PathBuf),

    #[error("no backup matches '{0}'")]
    EntryNotFound(String),

    #[error("failed to {action} {path}: {source}")]
    WriteFailure {
        action: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid selection '{0}'")]
    InvalidSelector(String),

    #[error("backup '{0}' already exists and noclobber is set")]
    AlreadyExists(String),

    #[error("save folder '{0}' not found")]
    SaveDirMissing(Utf8PathBuf),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    pub fn write_failure(action: &'static str, path: &Utf8Path, source: io::Error) -> Self {
        StoreError::WriteFailure {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

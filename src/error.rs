//! Errors returned by the persistence and sample data modules.

use std::path::PathBuf;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////

/// Failures at the persistence boundary.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the database file failed.
    #[error("i/o error on '{}': {source}", .path.display())]
    Io {
        /// The file that was being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The database file isn't a valid document.
    #[error("malformed database '{}': {source}", .path.display())]
    Malformed {
        /// The file that was being parsed.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The tree couldn't be turned into a document.
    #[error("failed to encode database: {0}")]
    Encode(#[source] serde_json::Error),
}

////////////////////////////////////////////////////////////////////////////////

/// Rejected requests for generated sample data.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenerateError {
    /// Zero records were requested.
    #[error("record count must be positive")]
    Empty,
    /// More records than the limit were requested.
    #[error("cannot generate {requested} records, the maximum is {max}")]
    TooMany {
        /// How many records were asked for.
        requested: usize,
        /// The largest count allowed.
        max: usize,
    },
}

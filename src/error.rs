//! Error taxonomy for a single upload run.
//!
//! Every failure surfaces as the run's single failure message; nothing is
//! recovered or retried internally. An empty upload directory is not an
//! error (see [`crate::upload::Outcome::NoFiles`]).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Type alias for Results with the run's error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required input or credential is empty or absent. Detected before
    /// any filesystem or network activity.
    #[error("{0}")]
    Configuration(String),

    /// The upload directory or one of its files could not be listed or read.
    #[error("failed to access '{path}': {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The storage backend rejected or failed an upload. `message` carries
    /// the backend's own text verbatim.
    #[error("upload of '{key}' failed: {message}")]
    Upload { key: String, message: String },
}

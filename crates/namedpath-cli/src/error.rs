//! Error types for namedpath-cli

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for namedpath-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in namedpath-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from namedpath-core
    #[error(transparent)]
    Core(#[from] namedpath_core::Error),

    /// Configuration file problem
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error with the path involved
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Some specifiers failed and warnings are treated as errors
    #[error("{failed} of {total} named paths could not be resolved")]
    Unresolved {
        /// Number of failed specifiers
        failed: usize,
        /// Number of specifiers attempted
        total: usize,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

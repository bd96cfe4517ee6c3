//! Error types for makedeps-core.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for dependency-update operations.
pub type Result<T> = std::result::Result<T, DepsError>;

/// Errors that can occur while regenerating the dependency fragment.
///
/// Unresolvable includes are deliberately absent: a `#include` that matches
/// nothing on the search path is dropped, not reported.
#[derive(Error, Diagnostic, Debug)]
pub enum DepsError {
    /// Failed to read a source, header, directory, or config file.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the generated fragment.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O failure with no single file to blame.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The configured source pattern is not a valid glob.
    #[error("Invalid source pattern {pattern:?}: {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Started neither from the project root nor from its scripts directory.
    #[error("Must be run from the project root (no {} directory found)", landmark.display())]
    WrongDirectory { landmark: PathBuf },
}

impl DepsError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DepsError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DepsError::Write {
            path: path.into(),
            source,
        }
    }
}

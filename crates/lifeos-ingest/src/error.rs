//! Error types for the ingestion pipeline

use lifeos_classifier::ClassifierError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a run or an ingestion step
///
/// Store failures on a single candidate or chunk are absorbed by the
/// pipeline and reported; only errors that prevent establishing the run
/// (configuration, reading sources) reach the caller.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Classifier could not be built
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// Reading a source failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// An export file is not valid JSON of the expected shape
    #[error("Invalid export {}: {source}", path.display())]
    Export {
        /// Export file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Record store error
    #[error("Store error: {0}")]
    Store(String),

    /// Row serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Source filename pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Another run holds the run lock
    #[error("Another run is in progress (lock file {} exists)", .0.display())]
    Locked(PathBuf),
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IngestError::Io {
            path: path.into(),
            source,
        }
    }
}

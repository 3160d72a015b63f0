//! Classifier error types

use thiserror::Error;

/// Errors that can occur while building the classifier
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A detector pattern failed to compile
    #[error("Invalid pattern for {category}: {source}")]
    Pattern {
        /// Category whose pattern failed
        category: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },
}

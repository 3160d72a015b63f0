//! Configuration for an ingestion run

use crate::IngestError;
use lifeos_classifier::ClassifierConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the ingestion pipeline
///
/// Built once at startup, validated, and passed into the pipeline; the
/// pipeline never mutates it.
///
/// # Examples
///
/// ```
/// use lifeos_ingest::IngestConfig;
///
/// let config = IngestConfig::from_toml(r#"
///     journal_dir = "/home/me/journal"
///     batch_size = 50
/// "#).unwrap();
/// assert_eq!(config.batch_size, 50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Directory of daily journal files named `YYYY-MM-DD.<ext>`
    pub journal_dir: Option<PathBuf>,

    /// Directory holding the fixed-name JSON exports
    pub export_dir: Option<PathBuf>,

    /// Directory of transcript files; defaults to `transcripts` next to `export_dir`
    pub transcripts_dir: Option<PathBuf>,

    /// Extension of daily journal files (without the dot)
    pub journal_extension: String,

    /// Records per bulk insert
    pub batch_size: usize,

    /// Characters of a transcript kept as its summary
    pub summary_chars: usize,

    /// Optional lock file guarding against concurrent runs
    pub lock_file: Option<PathBuf>,

    /// Line classifier settings
    pub classifier: ClassifierConfig,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            journal_dir: None,
            export_dir: None,
            transcripts_dir: None,
            journal_extension: "md".to_string(),
            batch_size: 100,
            summary_chars: 500,
            lock_file: None,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl IngestConfig {
    /// Effective transcripts directory
    pub fn transcripts_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.transcripts_dir {
            return Some(dir.clone());
        }
        let export_dir = self.export_dir.as_ref()?;
        Some(match export_dir.parent() {
            Some(parent) => parent.join("transcripts"),
            None => export_dir.join("..").join("transcripts"),
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.journal_dir.is_none() && self.export_dir.is_none() && self.transcripts_dir.is_none() {
            return Err(IngestError::Config(
                "no source configured: set journal_dir or export_dir".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(IngestError::Config("batch_size must be greater than 0".to_string()));
        }
        if self.summary_chars == 0 {
            return Err(IngestError::Config("summary_chars must be greater than 0".to_string()));
        }
        let extension = self.journal_extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(IngestError::Config("journal_extension must not be empty".to_string()));
        }
        self.classifier.validate()?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, IngestError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, IngestError> {
        toml::to_string_pretty(self)
            .map_err(|e| IngestError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

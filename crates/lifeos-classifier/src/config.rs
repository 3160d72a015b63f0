//! Classifier configuration

use crate::ClassifierError;
use serde::{Deserialize, Serialize};

/// Configuration for the line classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Name that must appear alongside walk vocabulary for a walk to count
    pub walk_companion: String,

    /// Maximum characters kept in win and challenge titles
    pub title_max_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            walk_companion: "bailey".to_string(),
            title_max_chars: 200,
        }
    }
}

impl ClassifierConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.walk_companion.trim().is_empty() {
            return Err(ClassifierError::Config(
                "walk_companion must not be empty".to_string(),
            ));
        }
        if self.title_max_chars == 0 {
            return Err(ClassifierError::Config(
                "title_max_chars must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

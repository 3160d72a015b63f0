//! Bulk loaders - turn export files and transcripts into bulk records

use crate::IngestError;
use chrono::NaiveDate;
use lifeos_domain::{truncate_chars, BulkKind, BulkRecord, Decision, ReminderExport, Task, Transcript};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Parse a JSON export file for `kind`
///
/// The file must hold one array of objects of the kind's shape.
pub fn load_export(kind: BulkKind, path: &Path) -> Result<Vec<BulkRecord>, IngestError> {
    let text = fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    parse_export(kind, &text).map_err(|source| IngestError::Export {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_export(kind: BulkKind, text: &str) -> Result<Vec<BulkRecord>, serde_json::Error> {
    Ok(match kind {
        BulkKind::Reminders => serde_json::from_str::<Vec<ReminderExport>>(text)?
            .into_iter()
            .map(|r| BulkRecord::Reminder(r.into()))
            .collect(),
        BulkKind::Decisions => serde_json::from_str::<Vec<Decision>>(text)?
            .into_iter()
            .map(BulkRecord::Decision)
            .collect(),
        BulkKind::Tasks => serde_json::from_str::<Vec<Task>>(text)?
            .into_iter()
            .map(BulkRecord::Task)
            .collect(),
        BulkKind::Transcripts => serde_json::from_str::<Vec<Transcript>>(text)?
            .into_iter()
            .map(BulkRecord::Transcript)
            .collect(),
    })
}

/// Derives transcript metadata from text files
#[derive(Debug, Clone)]
pub struct TranscriptLoader {
    date_in_name: Regex,
    summary_chars: usize,
}

impl TranscriptLoader {
    /// Loader keeping the first `summary_chars` characters as the summary
    pub fn new(summary_chars: usize) -> Result<Self, IngestError> {
        Ok(Self {
            date_in_name: Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}")?,
            summary_chars,
        })
    }

    /// Date embedded in a filename, or `today`
    pub fn date_for(&self, file_name: &str, today: NaiveDate) -> NaiveDate {
        self.date_in_name
            .find(file_name)
            .and_then(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok())
            .unwrap_or(today)
    }

    /// Build the metadata record for one transcript's content
    pub fn transcript(&self, path: &Path, content: &str, today: NaiveDate) -> Transcript {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let title = file_name
            .strip_suffix(".txt")
            .or_else(|| file_name.strip_suffix(".md"))
            .unwrap_or(&file_name)
            .to_string();

        Transcript {
            date: self.date_for(&file_name, today),
            title,
            // whitespace runs at either end add no words; empty content counts 0
            word_count: content.split_whitespace().count(),
            summary: truncate_chars(content, self.summary_chars),
            file_path: path.display().to_string(),
        }
    }

    /// Read and describe one transcript file
    pub fn load(&self, path: &Path, today: NaiveDate) -> Result<BulkRecord, IngestError> {
        let content = fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
        Ok(BulkRecord::Transcript(self.transcript(path, &content, today)))
    }
}

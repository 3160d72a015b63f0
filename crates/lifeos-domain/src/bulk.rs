//! Bulk records - pre-structured rows imported from external exports
//!
//! Bulk records are not classified and carry no dedup key: the import path
//! inserts them without an existence check, so importing the same export
//! twice stores every record twice.

use crate::category::BulkKind;
use crate::traits::Row;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Source tag written on imported reminders
pub const REMINDER_SOURCE: &str = "limitless";

/// A reminder as it appears in the export file (camelCase fields)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderExport {
    /// Reminder text
    pub title: String,
    /// Due date as exported, if any
    #[serde(default)]
    pub due_date: Option<String>,
    /// Export status string
    #[serde(default)]
    pub status: String,
    /// Who created the reminder
    #[serde(default)]
    pub created_by: String,
    /// Completion flag
    #[serde(default)]
    pub completed: bool,
}

/// A reminder row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// Reminder text
    pub title: String,
    /// Due date as exported, if any
    pub due_date: Option<String>,
    /// Status string
    pub status: String,
    /// Who created the reminder
    pub created_by: String,
    /// Completion flag
    pub completed: bool,
    /// Where the reminder came from
    pub source: String,
}

impl From<ReminderExport> for Reminder {
    fn from(r: ReminderExport) -> Self {
        Self {
            title: r.title,
            due_date: r.due_date,
            status: r.status,
            created_by: r.created_by,
            completed: r.completed,
            source: REMINDER_SOURCE.to_string(),
        }
    }
}

/// A decision row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Day the decision was made
    pub date: NaiveDate,
    /// What was decided
    pub decision_text: String,
    /// Surrounding context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Origin of the decision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A task row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Day the task was captured
    pub date: NaiveDate,
    /// Task text
    pub task_text: String,
    /// Surrounding context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Completion flag
    #[serde(default)]
    pub completed: bool,
    /// Origin of the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Metadata for one transcript file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Date taken from the filename, or the import day
    pub date: NaiveDate,
    /// Filename without its extension
    pub title: String,
    /// Number of whitespace-separated words
    pub word_count: usize,
    /// Leading characters of the content
    pub summary: String,
    /// Path the transcript was read from
    pub file_path: String,
}

/// Any bulk record
#[derive(Debug, Clone, PartialEq)]
pub enum BulkRecord {
    /// Reminder
    Reminder(Reminder),
    /// Decision
    Decision(Decision),
    /// Task
    Task(Task),
    /// Transcript metadata
    Transcript(Transcript),
}

impl BulkRecord {
    /// Kind of this record
    pub fn kind(&self) -> BulkKind {
        match self {
            BulkRecord::Reminder(_) => BulkKind::Reminders,
            BulkRecord::Decision(_) => BulkKind::Decisions,
            BulkRecord::Task(_) => BulkKind::Tasks,
            BulkRecord::Transcript(_) => BulkKind::Transcripts,
        }
    }

    /// Serialize to a store row
    pub fn to_row(&self) -> Result<Row, serde_json::Error> {
        let value = match self {
            BulkRecord::Reminder(r) => serde_json::to_value(r)?,
            BulkRecord::Decision(r) => serde_json::to_value(r)?,
            BulkRecord::Task(r) => serde_json::to_value(r)?,
            BulkRecord::Transcript(r) => serde_json::to_value(r)?,
        };
        serde_json::from_value(value)
    }
}

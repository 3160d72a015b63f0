//! Record categories and the store tables they land in

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a journal record produced by line classification
///
/// Detection is non-exclusive: a single journal line may yield one
/// candidate per matching category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Dog walk (at most one per day)
    Walk,
    /// Meal description
    Meal,
    /// Something that went well
    Win,
    /// Something that went badly or blocked progress
    Challenge,
    /// Mood or affect note
    Mood,
    /// Hours worked
    WorkHours,
}

impl Category {
    /// All categories in classification order
    pub const ALL: [Category; 6] = [
        Category::Walk,
        Category::Meal,
        Category::Win,
        Category::Challenge,
        Category::Mood,
        Category::WorkHours,
    ];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Walk => "walk",
            Category::Meal => "meal",
            Category::Win => "win",
            Category::Challenge => "challenge",
            Category::Mood => "mood",
            Category::WorkHours => "work-hours",
        }
    }

    /// Table that stores records of this category
    pub fn table(&self) -> Table {
        match self {
            Category::Walk => Table::Walks,
            Category::Meal => Table::Meals,
            Category::Win => Table::Wins,
            Category::Challenge => Table::Challenges,
            Category::Mood => Table::MoodEntries,
            Category::WorkHours => Table::WorkHours,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of bulk export source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkKind {
    /// Reminders export
    Reminders,
    /// Decisions export
    Decisions,
    /// Tasks export
    Tasks,
    /// Transcript metadata derived from a directory of text files
    Transcripts,
}

impl BulkKind {
    /// All bulk kinds in import order
    pub const ALL: [BulkKind; 4] = [
        BulkKind::Reminders,
        BulkKind::Decisions,
        BulkKind::Tasks,
        BulkKind::Transcripts,
    ];

    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkKind::Reminders => "reminders",
            BulkKind::Decisions => "decisions",
            BulkKind::Tasks => "tasks",
            BulkKind::Transcripts => "transcripts",
        }
    }

    /// Fixed export filename, if this kind is read from a JSON export
    pub fn export_file_name(&self) -> Option<&'static str> {
        match self {
            BulkKind::Reminders => Some("existing-reminders.json"),
            BulkKind::Decisions => Some("decisions.json"),
            BulkKind::Tasks => Some("tasks.json"),
            BulkKind::Transcripts => None,
        }
    }

    /// Table that stores records of this kind
    pub fn table(&self) -> Table {
        match self {
            BulkKind::Reminders => Table::Reminders,
            BulkKind::Decisions => Table::Decisions,
            BulkKind::Tasks => Table::Tasks,
            BulkKind::Transcripts => Table::Transcripts,
        }
    }
}

impl fmt::Display for BulkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store table (collection) name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    /// Walk records
    #[serde(rename = "bailey_walks")]
    Walks,
    /// Meal records
    Meals,
    /// Win records
    Wins,
    /// Challenge records
    Challenges,
    /// Mood records
    MoodEntries,
    /// Work hour records
    WorkHours,
    /// Imported reminders
    #[serde(rename = "limitless_reminders")]
    Reminders,
    /// Imported decisions
    #[serde(rename = "limitless_decisions")]
    Decisions,
    /// Imported tasks
    #[serde(rename = "limitless_tasks")]
    Tasks,
    /// Imported transcript metadata
    #[serde(rename = "limitless_transcripts")]
    Transcripts,
}

impl Table {
    /// Every table known to LifeOS
    pub const ALL: [Table; 10] = [
        Table::Walks,
        Table::Meals,
        Table::Wins,
        Table::Challenges,
        Table::MoodEntries,
        Table::WorkHours,
        Table::Reminders,
        Table::Decisions,
        Table::Tasks,
        Table::Transcripts,
    ];

    /// Table name as used by the store
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Walks => "bailey_walks",
            Table::Meals => "meals",
            Table::Wins => "wins",
            Table::Challenges => "challenges",
            Table::MoodEntries => "mood_entries",
            Table::WorkHours => "work_hours",
            Table::Reminders => "limitless_reminders",
            Table::Decisions => "limitless_decisions",
            Table::Tasks => "limitless_tasks",
            Table::Transcripts => "limitless_transcripts",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown table: {}", s))
    }
}

//! Journal records - typed life events classified from daily journal lines

use crate::category::Category;
use crate::key::{FieldValue, KeyPredicate};
use crate::traits::Row;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dog walk. Keyed by date only, so a day holds at most one walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkRecord {
    /// Day of the walk
    pub date: NaiveDate,
    /// The journal line that mentioned it
    pub notes: String,
}

/// A meal, keyed by `(date, description)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    /// Day of the meal
    pub date: NaiveDate,
    /// The journal line describing it
    pub description: String,
}

/// A win, keyed by `(date, title)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinRecord {
    /// Day of the win
    pub date: NaiveDate,
    /// Truncated line used as the title
    pub title: String,
    /// Full journal line
    pub description: String,
}

/// A challenge, keyed by `(date, title)`
///
/// Resolution fields are owned by the downstream application; ingestion
/// only ever creates unresolved challenges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeRecord {
    /// Day of the challenge
    pub date: NaiveDate,
    /// Truncated line used as the title
    pub title: String,
    /// Full journal line
    pub description: String,
}

/// A mood note, keyed by `(date, notes)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRecord {
    /// Day of the note
    pub date: NaiveDate,
    /// The journal line
    pub notes: String,
}

/// Hours worked, keyed by `(date, hours)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHoursRecord {
    /// Day worked
    pub date: NaiveDate,
    /// Hour count extracted from the line
    pub hours: f64,
    /// The journal line
    pub description: String,
}

/// A classified journal record (candidate until persisted)
#[derive(Debug, Clone, PartialEq)]
pub enum JournalRecord {
    /// Walk
    Walk(WalkRecord),
    /// Meal
    Meal(MealRecord),
    /// Win
    Win(WinRecord),
    /// Challenge
    Challenge(ChallengeRecord),
    /// Mood
    Mood(MoodRecord),
    /// Work hours
    WorkHours(WorkHoursRecord),
}

impl JournalRecord {
    /// Build the record for `category` from one journal line
    ///
    /// `line` is trimmed; win and challenge titles are cut to
    /// `title_max_chars` characters. `hours` is only read for work hours.
    pub fn from_line(
        category: Category,
        date: NaiveDate,
        line: &str,
        hours: Option<f64>,
        title_max_chars: usize,
    ) -> Option<Self> {
        let text = line.trim().to_string();
        let record = match category {
            Category::Walk => JournalRecord::Walk(WalkRecord { date, notes: text }),
            Category::Meal => JournalRecord::Meal(MealRecord {
                date,
                description: text,
            }),
            Category::Win => JournalRecord::Win(WinRecord {
                date,
                title: truncate_chars(&text, title_max_chars),
                description: text,
            }),
            Category::Challenge => JournalRecord::Challenge(ChallengeRecord {
                date,
                title: truncate_chars(&text, title_max_chars),
                description: text,
            }),
            Category::Mood => JournalRecord::Mood(MoodRecord { date, notes: text }),
            Category::WorkHours => JournalRecord::WorkHours(WorkHoursRecord {
                date,
                hours: hours?,
                description: text,
            }),
        };
        Some(record)
    }

    /// Category of this record
    pub fn category(&self) -> Category {
        match self {
            JournalRecord::Walk(_) => Category::Walk,
            JournalRecord::Meal(_) => Category::Meal,
            JournalRecord::Win(_) => Category::Win,
            JournalRecord::Challenge(_) => Category::Challenge,
            JournalRecord::Mood(_) => Category::Mood,
            JournalRecord::WorkHours(_) => Category::WorkHours,
        }
    }

    /// Day the record belongs to
    pub fn date(&self) -> NaiveDate {
        match self {
            JournalRecord::Walk(r) => r.date,
            JournalRecord::Meal(r) => r.date,
            JournalRecord::Win(r) => r.date,
            JournalRecord::Challenge(r) => r.date,
            JournalRecord::Mood(r) => r.date,
            JournalRecord::WorkHours(r) => r.date,
        }
    }

    /// Fields that identify this record within its table
    pub fn dedup_key(&self) -> KeyPredicate {
        let key = KeyPredicate::new().eq("date", FieldValue::Date(self.date()));
        match self {
            JournalRecord::Walk(_) => key,
            JournalRecord::Meal(r) => key.eq("description", FieldValue::Text(r.description.clone())),
            JournalRecord::Win(r) => key.eq("title", FieldValue::Text(r.title.clone())),
            JournalRecord::Challenge(r) => key.eq("title", FieldValue::Text(r.title.clone())),
            JournalRecord::Mood(r) => key.eq("notes", FieldValue::Text(r.notes.clone())),
            JournalRecord::WorkHours(r) => key.eq("hours", FieldValue::Number(r.hours)),
        }
    }

    /// Serialize to a store row
    pub fn to_row(&self) -> Result<Row, serde_json::Error> {
        let value = match self {
            JournalRecord::Walk(r) => serde_json::to_value(r)?,
            JournalRecord::Meal(r) => serde_json::to_value(r)?,
            JournalRecord::Win(r) => serde_json::to_value(r)?,
            JournalRecord::Challenge(r) => serde_json::to_value(r)?,
            JournalRecord::Mood(r) => serde_json::to_value(r)?,
            JournalRecord::WorkHours(r) => serde_json::to_value(r)?,
        };
        serde_json::from_value(value)
    }
}

/// Cut `text` to at most `max_chars` characters without splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

//! LifeOS Domain Layer
//!
//! Record types and trait seams shared by every LifeOS ingestion crate.
//!
//! ## Key Concepts
//!
//! - **Journal record**: a typed life event (walk, meal, win, challenge, mood,
//!   work hours) classified out of a daily journal line
//! - **Dedup key**: the per-category field tuple that identifies a journal record
//!   in the store; at most one stored record exists per `(table, dedup key)`
//! - **Bulk record**: a pre-structured row from an external export
//!   (reminders, decisions, tasks, transcript metadata)
//! - **Record store**: the persistence seam (`insert`, `insert_batch`, `find_one`)
//!
//! ## Architecture
//!
//! This crate holds no I/O. Store implementations live in `lifeos-store`,
//! classification in `lifeos-classifier`, orchestration in `lifeos-ingest`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bulk;
pub mod category;
pub mod id;
pub mod key;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use bulk::{BulkRecord, Decision, Reminder, ReminderExport, Task, Transcript};
pub use category::{BulkKind, Category, Table};
pub use id::RecordId;
pub use key::{FieldValue, KeyPredicate};
pub use record::{
    truncate_chars, ChallengeRecord, JournalRecord, MealRecord, MoodRecord, WalkRecord,
    WinRecord, WorkHoursRecord,
};
pub use traits::{RecordStore, Row, StoredRecord};

//! Run Reporter - counts and notices accumulated over one run

use crate::batch::BatchOutcome;
use chrono::{DateTime, Utc};
use lifeos_domain::{BulkKind, Category};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Journal outcomes for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryTally {
    /// Candidates inserted as new records
    pub created: usize,
    /// Candidates whose dedup key was already stored
    pub skipped: usize,
    /// Candidates whose lookup or insert failed
    pub failed: usize,
}

/// Bulk outcomes for one kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkTally {
    /// Records read from the source
    pub found: usize,
    /// Records in chunks that were stored
    pub imported: usize,
    /// Records in chunks that failed
    pub failed: usize,
    /// 1-based indices of failed chunks
    pub failed_chunks: Vec<usize>,
}

/// A source that was absent and whose phase was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceNotice {
    /// Which source (`journal`, `reminders`, ...)
    pub source: String,
    /// Path that was looked up
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Summary of one ingestion run
///
/// Emitted once when the run ends; nothing is persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run ended
    pub finished_at: Option<DateTime<Utc>>,
    /// Daily journal files read
    pub files_scanned: usize,
    /// Journal lines read, including skipped ones
    pub lines_scanned: usize,
    /// Journal outcomes per category
    pub journal: BTreeMap<Category, CategoryTally>,
    /// Bulk outcomes per kind
    pub bulk: BTreeMap<BulkKind, BulkTally>,
    /// Skipped sources
    pub notices: Vec<SourceNotice>,
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

impl RunReport {
    /// Empty report; every category and kind starts at zero
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            files_scanned: 0,
            lines_scanned: 0,
            journal: Category::ALL
                .iter()
                .map(|c| (*c, CategoryTally::default()))
                .collect(),
            bulk: BulkKind::ALL
                .iter()
                .map(|k| (*k, BulkTally::default()))
                .collect(),
            notices: Vec::new(),
        }
    }

    /// Record a new journal record
    pub fn record_created(&mut self, category: Category) {
        self.journal.entry(category).or_default().created += 1;
    }

    /// Record a duplicate journal candidate
    pub fn record_skipped(&mut self, category: Category) {
        self.journal.entry(category).or_default().skipped += 1;
    }

    /// Record a failed journal candidate
    pub fn record_failed(&mut self, category: Category) {
        self.journal.entry(category).or_default().failed += 1;
    }

    /// Record the outcome of one bulk import
    pub fn record_bulk(&mut self, kind: BulkKind, outcome: &BatchOutcome) {
        let tally = self.bulk.entry(kind).or_default();
        tally.found += outcome.total;
        tally.imported += outcome.imported;
        tally.failed += outcome.failed();
        tally.failed_chunks.extend(outcome.failed_chunks());
    }

    /// Record a skipped source
    pub fn notice(&mut self, source: impl Into<String>, path: &Path, reason: impl Into<String>) {
        self.notices.push(SourceNotice {
            source: source.into(),
            path: path.to_path_buf(),
            reason: reason.into(),
        });
    }

    /// Stamp the end of the run
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Journal tally for one category
    pub fn category(&self, category: Category) -> CategoryTally {
        self.journal.get(&category).copied().unwrap_or_default()
    }

    /// Bulk tally for one kind
    pub fn bulk_kind(&self, kind: BulkKind) -> BulkTally {
        self.bulk.get(&kind).cloned().unwrap_or_default()
    }

    /// Journal records created across all categories
    pub fn total_created(&self) -> usize {
        self.journal.values().map(|t| t.created).sum()
    }

    /// Duplicate candidates across all categories
    pub fn total_skipped(&self) -> usize {
        self.journal.values().map(|t| t.skipped).sum()
    }

    /// Failed candidates and bulk records
    pub fn total_failed(&self) -> usize {
        self.journal.values().map(|t| t.failed).sum::<usize>()
            + self.bulk.values().map(|t| t.failed).sum::<usize>()
    }

    /// Bulk records imported across all kinds
    pub fn total_imported(&self) -> usize {
        self.bulk.values().map(|t| t.imported).sum()
    }

    /// Run duration in milliseconds, once finished
    pub fn duration_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds())
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "LifeOS Ingestion Summary".to_string(),
            "========================".to_string(),
            format!("Files scanned: {}", self.files_scanned),
            format!("Lines scanned: {}", self.lines_scanned),
        ];
        if let Some(ms) = self.duration_ms() {
            lines.push(format!("Duration: {}ms", ms));
        }
        lines.push(String::new());

        lines.push("Journal (created / skipped / failed):".to_string());
        for (category, tally) in &self.journal {
            lines.push(format!(
                "  {}: {} / {} / {}",
                category, tally.created, tally.skipped, tally.failed
            ));
        }
        lines.push(format!(
            "  Total: {} / {} / {}",
            self.total_created(),
            self.total_skipped(),
            self.journal.values().map(|t| t.failed).sum::<usize>()
        ));
        lines.push(String::new());

        lines.push("Bulk (imported of found):".to_string());
        for (kind, tally) in &self.bulk {
            let mut line = format!("  {}: {} of {}", kind, tally.imported, tally.found);
            if !tally.failed_chunks.is_empty() {
                let chunks: Vec<String> = tally.failed_chunks.iter().map(|c| c.to_string()).collect();
                line.push_str(&format!(" (failed chunks: {})", chunks.join(", ")));
            }
            lines.push(line);
        }
        lines.push(format!("  Total: {}", self.total_imported()));

        if !self.notices.is_empty() {
            lines.push(String::new());
            lines.push("Skipped sources:".to_string());
            for notice in &self.notices {
                lines.push(format!(
                    "  {}: {} ({})",
                    notice.source,
                    notice.path.display(),
                    notice.reason
                ));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::ChunkOutcome;

    #[test]
    fn test_new_report_lists_every_category_at_zero() {
        let report = RunReport::new();
        assert_eq!(report.journal.len(), Category::ALL.len());
        assert_eq!(report.bulk.len(), BulkKind::ALL.len());
        assert_eq!(report.total_created(), 0);
        assert_eq!(report.total_failed(), 0);
        assert_eq!(report.bulk_kind(BulkKind::Tasks), BulkTally::default());
    }

    #[test]
    fn test_journal_counters() {
        let mut report = RunReport::new();
        report.record_created(Category::Win);
        report.record_created(Category::Win);
        report.record_skipped(Category::Walk);
        report.record_failed(Category::Meal);

        assert_eq!(
            report.category(Category::Win),
            CategoryTally { created: 2, skipped: 0, failed: 0 }
        );
        assert_eq!(report.total_created(), 2);
        assert_eq!(report.total_skipped(), 1);
        assert_eq!(report.total_failed(), 1);
    }

    #[test]
    fn test_bulk_outcome_recorded() {
        let outcome = BatchOutcome {
            total: 250,
            imported: 150,
            chunks: vec![
                ChunkOutcome { index: 1, size: 100, error: None },
                ChunkOutcome { index: 2, size: 100, error: Some("boom".into()) },
                ChunkOutcome { index: 3, size: 50, error: None },
            ],
        };
        let mut report = RunReport::new();
        report.record_bulk(BulkKind::Reminders, &outcome);

        let tally = report.bulk_kind(BulkKind::Reminders);
        assert_eq!(tally.found, 250);
        assert_eq!(tally.imported, 150);
        assert_eq!(tally.failed, 100);
        assert_eq!(tally.failed_chunks, vec![2]);
    }

    #[test]
    fn test_summary_mentions_notices_and_failed_chunks() {
        let mut report = RunReport::new();
        report.record_created(Category::Walk);
        report.notice("tasks", Path::new("/x/tasks.json"), "file not found");
        report.bulk.insert(
            BulkKind::Decisions,
            BulkTally { found: 3, imported: 0, failed: 3, failed_chunks: vec![1] },
        );
        report.finish();

        let summary = report.summary();
        assert!(summary.contains("walk: 1 / 0 / 0"));
        assert!(summary.contains("decisions: 0 of 3 (failed chunks: 1)"));
        assert!(summary.contains("tasks: /x/tasks.json (file not found)"));
        assert!(summary.contains("Duration:"));
    }

    #[test]
    fn test_json_form_uses_names_as_keys() {
        let mut report = RunReport::new();
        report.record_created(Category::WorkHours);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["journal"]["work-hours"]["created"], 1);
        assert_eq!(value["bulk"]["reminders"]["found"], 0);
    }
}

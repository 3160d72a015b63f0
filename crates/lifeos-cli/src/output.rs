//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use lifeos_classifier::Candidate;
use lifeos_domain::{JournalRecord, Table};
use lifeos_ingest::RunReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the end-of-run report.
    pub fn format_report(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(format!(
                "created={} skipped={} imported={} failed={}",
                report.total_created(),
                report.total_skipped(),
                report.total_imported(),
                report.total_failed()
            )),
        }
    }

    fn format_report_table(&self, report: &RunReport) -> String {
        let mut journal = Builder::default();
        journal.push_record(["Category", "Created", "Skipped", "Failed"]);
        for (category, tally) in &report.journal {
            journal.push_record([
                category.to_string(),
                tally.created.to_string(),
                tally.skipped.to_string(),
                tally.failed.to_string(),
            ]);
        }

        let mut bulk = Builder::default();
        bulk.push_record(["Source", "Found", "Imported", "Failed", "Failed chunks"]);
        for (kind, tally) in &report.bulk {
            let chunks: Vec<String> = tally.failed_chunks.iter().map(|c| c.to_string()).collect();
            bulk.push_record([
                kind.to_string(),
                tally.found.to_string(),
                tally.imported.to_string(),
                tally.failed.to_string(),
                chunks.join(", "),
            ]);
        }

        let mut sections = vec![
            format!(
                "Scanned {} files, {} lines",
                report.files_scanned, report.lines_scanned
            ),
            styled(journal),
            styled(bulk),
        ];
        for notice in &report.notices {
            sections.push(self.warning(&format!(
                "Skipped {}: {} ({})",
                notice.source,
                notice.path.display(),
                notice.reason
            )));
        }

        let totals = format!(
            "{} created, {} duplicates, {} imported",
            report.total_created(),
            report.total_skipped(),
            report.total_imported()
        );
        if report.total_failed() > 0 {
            sections.push(self.warning(&format!("{}, {} failed", totals, report.total_failed())));
        } else {
            sections.push(self.success(&totals));
        }

        sections.join("\n")
    }

    /// Format record counts per table.
    pub fn format_counts(&self, counts: &[(Table, usize)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = counts
                    .iter()
                    .map(|(table, count)| (table.to_string(), serde_json::json!(count)))
                    .collect();
                Ok(serde_json::to_string_pretty(&map)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Table", "Records"]);
                for (table, count) in counts {
                    builder.push_record([table.to_string(), count.to_string()]);
                }
                Ok(styled(builder))
            }
            OutputFormat::Quiet => Ok(counts
                .iter()
                .map(|(table, count)| format!("{} {}", table, count))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format classified candidates.
    pub fn format_candidates(&self, candidates: &[Candidate]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows = candidates
                    .iter()
                    .map(|c| {
                        let record = c.record.to_row()?;
                        Ok(serde_json::json!({
                            "line": c.line_number,
                            "category": c.record.category(),
                            "record": record,
                        }))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => {
                if candidates.is_empty() {
                    return Ok(self.colorize("No records found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Line", "Category", "Date", "Text"]);
                for candidate in candidates {
                    builder.push_record([
                        candidate.line_number.to_string(),
                        candidate.record.category().to_string(),
                        candidate.record.date().to_string(),
                        record_text(&candidate.record),
                    ]);
                }
                Ok(styled(builder))
            }
            OutputFormat::Quiet => Ok(candidates
                .iter()
                .map(|c| format!("{}\t{}", c.line_number, c.record.category()))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// The text column shown for a record.
fn record_text(record: &JournalRecord) -> String {
    match record {
        JournalRecord::Walk(r) => r.notes.clone(),
        JournalRecord::Meal(r) => r.description.clone(),
        JournalRecord::Win(r) => r.title.clone(),
        JournalRecord::Challenge(r) => r.title.clone(),
        JournalRecord::Mood(r) => r.notes.clone(),
        JournalRecord::WorkHours(r) => format!("{}h: {}", r.hours, r.description),
    }
}

//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::error::Result;
use crate::output::Formatter;
use chrono::{Local, NaiveDate};
use lifeos_classifier::{Candidate, Classifier};
use lifeos_ingest::{IngestConfig, IngestError, SourceLocator};
use std::fs;
use std::path::Path;

/// Classify a file's lines without touching the store.
pub fn classify_file(path: &Path, date: NaiveDate, config: &IngestConfig) -> Result<Vec<Candidate>> {
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let classifier = Classifier::new(&config.classifier)?;
    Ok(classifier.classify_document(&text, date))
}

/// Day for a file: explicit date, else the filename's date, else today.
pub fn resolve_date(args: &ClassifyArgs, config: &IngestConfig) -> Result<NaiveDate> {
    if let Some(date) = args.date {
        return Ok(date);
    }
    let locator = SourceLocator::new(&config.journal_extension)?;
    let from_name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| locator.parse_daily_name(n));
    Ok(from_name.unwrap_or_else(|| Local::now().date_naive()))
}

/// Execute the classify command.
pub fn execute_classify(args: ClassifyArgs, config: &IngestConfig, formatter: &Formatter) -> Result<()> {
    let date = resolve_date(&args, config)?;
    let candidates = classify_file(&args.file, date, config)?;

    println!("{}", formatter.format_candidates(&candidates)?);

    Ok(())
}

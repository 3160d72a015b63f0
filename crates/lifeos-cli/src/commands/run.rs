//! Run, sync and import command implementation.

use crate::error::Result;
use crate::output::Formatter;
use lifeos_domain::RecordStore;
use lifeos_ingest::{IngestConfig, Pipeline, RunMode};

/// Execute one pipeline run and print its report.
///
/// Per-record failures are part of the report; only fatal pipeline
/// errors are returned.
pub async fn execute_run<S: RecordStore>(
    store: S,
    config: IngestConfig,
    mode: RunMode,
    formatter: &Formatter,
) -> Result<()> {
    let pipeline = Pipeline::new(store, config)?;
    let report = pipeline.run(mode).await?;

    println!("{}", formatter.format_report(&report)?);

    Ok(())
}

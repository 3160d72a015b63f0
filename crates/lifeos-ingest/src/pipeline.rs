//! Core Pipeline implementation

use crate::batch::BatchImporter;
use crate::bulk::{load_export, TranscriptLoader};
use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::locator::{Located, SourceLocator};
use crate::lock::RunLock;
use crate::oracle::{DedupOracle, Submission};
use crate::report::RunReport;
use chrono::Local;
use lifeos_classifier::Classifier;
use lifeos_domain::{BulkKind, BulkRecord, RecordStore, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which phases a run performs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Journal sync, then every bulk import
    #[default]
    All,
    /// Journal sync only
    Journal,
    /// Bulk imports only
    Bulk,
}

impl RunMode {
    fn includes_journal(self) -> bool {
        matches!(self, RunMode::All | RunMode::Journal)
    }

    fn includes_bulk(self) -> bool {
        matches!(self, RunMode::All | RunMode::Bulk)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunMode::All => "all",
            RunMode::Journal => "journal",
            RunMode::Bulk => "bulk",
        })
    }
}

/// The ingestion pipeline
///
/// Journal path: locate daily files, classify each line, and insert each
/// candidate through the dedup oracle. Bulk path: load export files and
/// transcripts and hand them to the batch importer. Store calls are made
/// one at a time, in file and line order.
pub struct Pipeline<S: RecordStore> {
    store: Arc<S>,
    config: IngestConfig,
    classifier: Classifier,
    locator: SourceLocator,
    transcripts: TranscriptLoader,
}

impl<S: RecordStore> Pipeline<S> {
    /// Create a pipeline; the configuration is validated here
    pub fn new(store: S, config: IngestConfig) -> Result<Self, IngestError> {
        Self::with_shared_store(Arc::new(store), config)
    }

    /// Create a pipeline over a store the caller keeps a handle to
    pub fn with_shared_store(store: Arc<S>, config: IngestConfig) -> Result<Self, IngestError> {
        config.validate()?;
        let classifier = Classifier::new(&config.classifier)?;
        let locator = SourceLocator::new(&config.journal_extension)?;
        let transcripts = TranscriptLoader::new(config.summary_chars)?;

        Ok(Self {
            store,
            config,
            classifier,
            locator,
            transcripts,
        })
    }

    /// Store the pipeline writes to
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Configuration in use
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Perform one run
    ///
    /// Per-record and per-chunk store failures are counted in the report.
    /// An error is returned only when a source cannot be read or another
    /// run holds the lock.
    pub async fn run(&self, mode: RunMode) -> Result<RunReport, IngestError> {
        let _lock = match &self.config.lock_file {
            Some(path) => Some(RunLock::acquire(path)?),
            None => None,
        };

        info!("Starting {} run", mode);
        let mut report = RunReport::new();

        if mode.includes_journal() {
            self.sync_journal(&mut report).await?;
        }
        if mode.includes_bulk() {
            self.import_bulk(&mut report).await?;
        }

        report.finish();
        info!(
            "Run complete: {} created, {} duplicates, {} imported, {} failed",
            report.total_created(),
            report.total_skipped(),
            report.total_imported(),
            report.total_failed()
        );
        Ok(report)
    }

    /// Classify every daily journal file and insert new records
    pub async fn sync_journal(&self, report: &mut RunReport) -> Result<(), IngestError> {
        let Some(dir) = &self.config.journal_dir else {
            report.notice("journal", &PathBuf::new(), "journal_dir not configured");
            return Ok(());
        };

        let files = match self.locator.daily_files(dir)? {
            Located::Found(files) => files,
            Located::Missing(path) => {
                warn!("Journal directory {} not found, skipping", path.display());
                report.notice("journal", &path, "directory not found");
                return Ok(());
            }
        };

        info!("Syncing {} journal files from {}", files.len(), dir.display());
        let oracle = DedupOracle::new(self.store.as_ref());

        for file in files {
            let text = fs::read_to_string(&file.path).map_err(|e| IngestError::io(&file.path, e))?;
            report.files_scanned += 1;
            report.lines_scanned += text.lines().count();

            let candidates = self.classifier.classify_document(&text, file.date);
            debug!("{}: {} candidates", file.path.display(), candidates.len());

            for candidate in candidates {
                let category = candidate.record.category();
                match oracle.submit(&candidate.record).await {
                    Ok(Submission::Created(_)) => report.record_created(category),
                    Ok(Submission::Duplicate(_)) => report.record_skipped(category),
                    Err(e) => {
                        warn!(
                            "Failed to store {} from {}:{}: {}",
                            category,
                            file.path.display(),
                            candidate.line_number,
                            e
                        );
                        report.record_failed(category);
                    }
                }
            }
        }

        Ok(())
    }

    /// Import every bulk source: exports first, then transcripts
    pub async fn import_bulk(&self, report: &mut RunReport) -> Result<(), IngestError> {
        for kind in BulkKind::ALL {
            let records = match kind.export_file_name() {
                Some(name) => self.load_export_records(kind, name, report)?,
                None => self.load_transcripts(report)?,
            };
            let Some(records) = records else {
                continue;
            };

            if records.is_empty() {
                info!("No {} found", kind);
            } else {
                info!("Importing {} {}", records.len(), kind);
            }

            let rows = records
                .iter()
                .map(BulkRecord::to_row)
                .collect::<Result<Vec<Row>, _>>()?;
            let outcome = BatchImporter::new(self.store.as_ref(), self.config.batch_size)
                .import(kind.table(), rows)
                .await;
            report.record_bulk(kind, &outcome);
        }
        Ok(())
    }

    fn load_export_records(
        &self,
        kind: BulkKind,
        name: &str,
        report: &mut RunReport,
    ) -> Result<Option<Vec<BulkRecord>>, IngestError> {
        let Some(dir) = &self.config.export_dir else {
            report.notice(kind.as_str(), &PathBuf::from(name), "export_dir not configured");
            return Ok(None);
        };

        match self.locator.export_file(dir, name) {
            Located::Found(path) => Ok(Some(load_export(kind, &path)?)),
            Located::Missing(path) => {
                warn!("{} not found, skipping {}", path.display(), kind);
                report.notice(kind.as_str(), &path, "file not found");
                Ok(None)
            }
        }
    }

    fn load_transcripts(&self, report: &mut RunReport) -> Result<Option<Vec<BulkRecord>>, IngestError> {
        let Some(dir) = self.config.transcripts_dir() else {
            report.notice("transcripts", &PathBuf::new(), "transcripts_dir not configured");
            return Ok(None);
        };

        match self.locator.transcript_files(&dir)? {
            Located::Found(files) => {
                let today = Local::now().date_naive();
                let records = files
                    .iter()
                    .map(|path| self.transcripts.load(path, today))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Some(records))
            }
            Located::Missing(path) => {
                warn!("Transcripts directory {} not found, skipping", path.display());
                report.notice("transcripts", &path, "directory not found");
                Ok(None)
            }
        }
    }
}

//! LifeOS Ingest
//!
//! Turns daily journal files and structured exports into stored LifeOS records.
//!
//! # Overview
//!
//! Two paths share one run:
//!
//! - **Journal path**: daily files named `YYYY-MM-DD.md` are split into lines,
//!   each line is classified into zero or more typed records, and every
//!   candidate goes through the dedup oracle before insert. Rerunning over
//!   unchanged files adds nothing.
//! - **Bulk path**: reminders, decisions and tasks exports plus a directory of
//!   transcripts are inserted in chunks of `batch_size`. A failed chunk does
//!   not stop the others. There is no existence check, so rerunning an import
//!   stores every record again.
//!
//! # Architecture
//!
//! ```text
//! SourceLocator → Classifier → DedupOracle → RecordStore
//! SourceLocator → bulk loaders → BatchImporter → RecordStore
//!                         RunReport observes both
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use lifeos_ingest::{IngestConfig, Pipeline, RunMode};
//! use lifeos_store::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::new("lifeos.db")?;
//! let config = IngestConfig {
//!     journal_dir: Some("/home/me/memory".into()),
//!     ..Default::default()
//! };
//!
//! let pipeline = Pipeline::new(store, config)?;
//! let report = pipeline.run(RunMode::All).await?;
//!
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod batch;
mod bulk;
mod config;
mod error;
mod locator;
mod lock;
mod oracle;
mod pipeline;
mod report;


pub use batch::{BatchImporter, BatchOutcome, ChunkOutcome};
pub use bulk::{load_export, TranscriptLoader};
pub use config::IngestConfig;
pub use error::IngestError;
pub use locator::{DailyFile, Located, SourceLocator};
pub use lock::RunLock;
pub use oracle::{DedupOracle, Submission};
pub use pipeline::{Pipeline, RunMode};
pub use report::{BulkTally, CategoryTally, RunReport, SourceNotice};

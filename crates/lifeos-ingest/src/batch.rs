//! Batch Importer - chunked, best-effort inserts for bulk records

use lifeos_domain::{RecordStore, Row, Table};
use serde::Serialize;
use tracing::{info, warn};

/// Result of inserting one chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkOutcome {
    /// 1-based chunk index
    pub index: usize,
    /// Rows in the chunk
    pub size: usize,
    /// Store error message when the chunk failed
    pub error: Option<String>,
}

impl ChunkOutcome {
    /// Whether the chunk was stored
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of a whole batch import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    /// Rows handed to the importer
    pub total: usize,
    /// Rows in chunks that succeeded
    pub imported: usize,
    /// Every chunk attempted, in order
    pub chunks: Vec<ChunkOutcome>,
}

impl BatchOutcome {
    /// Rows in chunks that failed
    pub fn failed(&self) -> usize {
        self.total - self.imported
    }

    /// Indices of the chunks that failed
    pub fn failed_chunks(&self) -> Vec<usize> {
        self.chunks
            .iter()
            .filter(|c| !c.succeeded())
            .map(|c| c.index)
            .collect()
    }
}

/// Splits rows into fixed-size chunks and inserts each independently
///
/// A failed chunk is logged and counted; later chunks are still attempted.
/// No existence check precedes the inserts, so importing the same rows twice
/// stores them twice.
pub struct BatchImporter<'a, S: RecordStore> {
    store: &'a S,
    chunk_size: usize,
}

impl<'a, S: RecordStore> BatchImporter<'a, S> {
    /// Importer writing chunks of `chunk_size` rows (at least 1)
    pub fn new(store: &'a S, chunk_size: usize) -> Self {
        Self {
            store,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Insert `rows` into `table`
    pub async fn import(&self, table: Table, rows: Vec<Row>) -> BatchOutcome {
        let mut outcome = BatchOutcome {
            total: rows.len(),
            ..Default::default()
        };
        if rows.is_empty() {
            info!("No {} to import", table);
            return outcome;
        }

        let chunk_count = rows.len().div_ceil(self.chunk_size);
        let mut rows = rows.into_iter().peekable();
        let mut index = 0;

        while rows.peek().is_some() {
            index += 1;
            let chunk: Vec<Row> = rows.by_ref().take(self.chunk_size).collect();
            let size = chunk.len();

            match self.store.insert_batch(table, chunk).await {
                Ok(_) => {
                    outcome.imported += size;
                    info!("Imported {} chunk {}/{} ({} rows)", table, index, chunk_count, size);
                    outcome.chunks.push(ChunkOutcome {
                        index,
                        size,
                        error: None,
                    });
                }
                Err(e) => {
                    warn!("Chunk {}/{} of {} failed: {}", index, chunk_count, table, e);
                    outcome.chunks.push(ChunkOutcome {
                        index,
                        size,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        outcome
    }
}

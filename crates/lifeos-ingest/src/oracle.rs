//! Dedup Oracle - check-then-insert for classified journal records

use crate::IngestError;
use lifeos_domain::{JournalRecord, RecordId, RecordStore};
use tracing::debug;

/// Outcome of submitting one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// No record with the same dedup key existed; the candidate was inserted
    Created(RecordId),
    /// A record with the same dedup key already exists; nothing was written
    Duplicate(RecordId),
}

/// Guards journal inserts with a dedup-key lookup
///
/// The lookup and the insert are two separate store calls. Two concurrent
/// runs can both miss and both insert; runs are serialized by the run lock.
pub struct DedupOracle<'a, S: RecordStore> {
    store: &'a S,
}

impl<'a, S: RecordStore> DedupOracle<'a, S> {
    /// Oracle over `store`
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Insert `record` unless its category table already holds its dedup key
    pub async fn submit(&self, record: &JournalRecord) -> Result<Submission, IngestError> {
        let table = record.category().table();
        let key = record.dedup_key();

        if let Some(existing) = self
            .store
            .find_one(table, &key)
            .await
            .map_err(|e| IngestError::Store(e.to_string()))?
        {
            debug!("Duplicate {} on {} ({})", record.category(), record.date(), existing.id);
            return Ok(Submission::Duplicate(existing.id));
        }

        let row = record.to_row()?;
        let id = self
            .store
            .insert(table, row)
            .await
            .map_err(|e| IngestError::Store(e.to_string()))?;
        debug!("Created {} on {} ({})", record.category(), record.date(), id);
        Ok(Submission::Created(id))
    }
}

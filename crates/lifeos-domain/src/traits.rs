//! Trait definitions for external interactions
//!
//! These traits define the boundaries between ingestion logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{KeyPredicate, RecordId, Table};
use async_trait::async_trait;

/// A store row: one JSON object per record
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A row read back from the store together with its identity
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    /// Store-assigned id
    pub id: RecordId,
    /// Stored fields
    pub row: Row,
}

/// Trait for persisting and looking up records
///
/// Implemented by the infrastructure layer (lifeos-store). Every call is
/// a suspension point; callers issue one request at a time and never
/// overlap requests within a run. Call timeouts belong to the implementation.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Error type for store operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Insert one row; the store assigns and returns its id
    async fn insert(&self, table: Table, row: Row) -> Result<RecordId, Self::Error>;

    /// Insert several rows as one operation
    ///
    /// Either every row is stored or the call fails.
    async fn insert_batch(&self, table: Table, rows: Vec<Row>) -> Result<Vec<RecordId>, Self::Error>;

    /// Find one record whose fields satisfy `key`
    async fn find_one(
        &self,
        table: Table,
        key: &KeyPredicate,
    ) -> Result<Option<StoredRecord>, Self::Error>;

    /// Number of records in `table`
    async fn count(&self, table: Table) -> Result<usize, Self::Error>;
}

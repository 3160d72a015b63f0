//! SQLite-backed record store

use crate::StoreError;
use async_trait::async_trait;
use lifeos_domain::{FieldValue, KeyPredicate, RecordId, RecordStore, Row, StoredRecord, Table};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Current timestamp in seconds since Unix epoch
fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// SQLite-based implementation of RecordStore
///
/// Records of every table share one `records` table; the record fields
/// live in a JSON `payload` column and dedup lookups compare JSON fields.
///
/// # Thread Safety
///
/// The connection sits behind a mutex. Calls are short and synchronous;
/// the lock is never held across an await point.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    /// The schema is created if absent; existing data is left untouched.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lifeos_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("lifeos.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn record_date(row: &Row) -> Option<String> {
        row.get("date").and_then(|v| v.as_str()).map(str::to_string)
    }

    fn insert_rows(&self, table: Table, rows: &[Row]) -> Result<Vec<RecordId>, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut ids = Vec::with_capacity(rows.len());

        for row in rows {
            let id = RecordId::new();
            let id_bytes = id.to_bytes();
            let payload = serde_json::to_string(row)?;
            tx.execute(
                "INSERT INTO records (id, table_name, record_date, payload, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    &id_bytes[..],
                    table.as_str(),
                    Self::record_date(row),
                    payload,
                    current_timestamp(),
                ],
            )?;
            ids.push(id);
        }

        tx.commit()?;
        debug!("Inserted {} row(s) into {}", ids.len(), table);
        Ok(ids)
    }

    fn find_row(&self, table: Table, key: &KeyPredicate) -> Result<Option<StoredRecord>, StoreError> {
        let mut sql = String::from("SELECT id, payload FROM records WHERE table_name = ?");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(table.as_str())];

        for (field, value) in &key.fields {
            sql.push_str(" AND json_extract(payload, ?) = ?");
            params.push(Box::new(format!("$.{}", field)));
            match value {
                FieldValue::Text(s) => params.push(Box::new(s.clone())),
                FieldValue::Date(_) => params.push(Box::new(value.to_string())),
                FieldValue::Number(n) => params.push(Box::new(*n)),
            }
        }
        sql.push_str(" ORDER BY created_at LIMIT 1");

        let conn = self.lock()?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let found = conn
            .query_row(&sql, &param_refs[..], |row| {
                let id: Vec<u8> = row.get(0)?;
                let payload: String = row.get(1)?;
                Ok((id, payload))
            })
            .optional()?;

        match found {
            Some((id_bytes, payload)) => {
                let id = RecordId::from_bytes(&id_bytes).map_err(StoreError::InvalidData)?;
                let row: Row = serde_json::from_str(&payload)?;
                Ok(Some(StoredRecord { id, row }))
            }
            None => Ok(None),
        }
    }

    fn count_rows(&self, table: Table) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM records WHERE table_name = ?1",
            params![table.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    type Error = StoreError;

    async fn insert(&self, table: Table, row: Row) -> Result<RecordId, Self::Error> {
        let ids = self.insert_rows(table, std::slice::from_ref(&row))?;
        ids.into_iter()
            .next()
            .ok_or_else(|| StoreError::InvalidData("insert returned no id".to_string()))
    }

    async fn insert_batch(&self, table: Table, rows: Vec<Row>) -> Result<Vec<RecordId>, Self::Error> {
        self.insert_rows(table, &rows)
    }

    async fn find_one(
        &self,
        table: Table,
        key: &KeyPredicate,
    ) -> Result<Option<StoredRecord>, Self::Error> {
        self.find_row(table, key)
    }

    async fn count(&self, table: Table) -> Result<usize, Self::Error> {
        self.count_rows(table)
    }
}

//! End-to-end tests for the ingestion pipeline
//!
//! These run full pipelines against a SQLite store over temporary
//! journal and export directories.

use async_trait::async_trait;
use lifeos_domain::{BulkKind, Category, KeyPredicate, RecordId, RecordStore, Row, StoredRecord, Table};
use lifeos_ingest::{BatchImporter, IngestConfig, Pipeline, RunMode};
use lifeos_store::{SqliteStore, StoreError};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
enum FlakyError {
    #[error("injected failure on {0} call {1}")]
    Injected(&'static str, usize),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// SQLite store that fails one chosen `insert` or `insert_batch` call
struct FlakyStore {
    inner: SqliteStore,
    fail_insert_call: usize,
    fail_batch_call: usize,
    insert_calls: AtomicUsize,
    batch_calls: AtomicUsize,
}

impl FlakyStore {
    fn failing(fail_insert_call: usize, fail_batch_call: usize) -> Self {
        Self {
            inner: SqliteStore::new(":memory:").expect("in-memory store"),
            fail_insert_call,
            fail_batch_call,
            insert_calls: AtomicUsize::new(0),
            batch_calls: AtomicUsize::new(0),
        }
    }

    fn failing_batch(fail_on_call: usize) -> Self {
        Self::failing(0, fail_on_call)
    }

    fn failing_insert(fail_on_call: usize) -> Self {
        Self::failing(fail_on_call, 0)
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    type Error = FlakyError;

    async fn insert(&self, table: Table, row: Row) -> Result<RecordId, Self::Error> {
        let call = self.insert_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_insert_call {
            return Err(FlakyError::Injected("insert", call));
        }
        Ok(self.inner.insert(table, row).await?)
    }

    async fn insert_batch(&self, table: Table, rows: Vec<Row>) -> Result<Vec<RecordId>, Self::Error> {
        let call = self.batch_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_batch_call {
            return Err(FlakyError::Injected("batch", call));
        }
        Ok(self.inner.insert_batch(table, rows).await?)
    }

    async fn find_one(
        &self,
        table: Table,
        key: &KeyPredicate,
    ) -> Result<Option<StoredRecord>, Self::Error> {
        Ok(self.inner.find_one(table, key).await?)
    }

    async fn count(&self, table: Table) -> Result<usize, Self::Error> {
        Ok(self.inner.count(table).await?)
    }
}

fn write_day(dir: &Path, date: &str, text: &str) {
    fs::write(dir.join(format!("{}.md", date)), text).unwrap();
}

fn journal_pipeline(dir: &Path) -> Pipeline<SqliteStore> {
    let config = IngestConfig {
        journal_dir: Some(dir.to_path_buf()),
        ..Default::default()
    };
    Pipeline::new(SqliteStore::new(":memory:").unwrap(), config).unwrap()
}

fn task_rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            serde_json::from_value(json!({
                "date": "2026-02-14",
                "task_text": format!("follow up {}", i),
                "completed": false
            }))
            .unwrap()
        })
        .collect()
}

#[tokio::test]
async fn test_journal_rerun_adds_nothing() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_day(
        dir.path(),
        "2026-02-13",
        "Walked Bailey at dawn\nHad a burger at the diner\nCoding for 4 hours on the importer\n",
    );
    write_day(
        dir.path(),
        "2026-02-14",
        "Shipped v2 but CI is blocked\nFeeling good about the launch\n",
    );
    let pipeline = journal_pipeline(dir.path());

    let first = pipeline.run(RunMode::Journal).await?;
    let stored_after_first: usize = count_all(pipeline.store()).await?;

    let second = pipeline.run(RunMode::Journal).await?;
    let stored_after_second: usize = count_all(pipeline.store()).await?;

    assert!(first.total_created() > 0);
    assert_eq!(stored_after_first, first.total_created());
    assert_eq!(second.total_created(), 0);
    assert_eq!(second.total_skipped(), first.total_created());
    assert_eq!(stored_after_second, stored_after_first);
    Ok(())
}

async fn count_all(store: &SqliteStore) -> anyhow::Result<usize> {
    let mut total = 0;
    for category in Category::ALL {
        total += store.count(category.table()).await?;
    }
    Ok(total)
}

#[tokio::test]
async fn test_bulk_rerun_doubles_records() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("decisions.json"),
        r#"[
            {"date": "2026-02-10", "decision_text": "Ship on Fridays"},
            {"date": "2026-02-11", "decision_text": "Drop the old API", "context": "planning"}
        ]"#,
    )?;
    let config = IngestConfig {
        export_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let pipeline = Pipeline::new(SqliteStore::new(":memory:")?, config)?;

    pipeline.run(RunMode::Bulk).await?;
    assert_eq!(pipeline.store().count(Table::Decisions).await?, 2);

    // bulk imports have no existence check
    pipeline.run(RunMode::Bulk).await?;
    assert_eq!(pipeline.store().count(Table::Decisions).await?, 4);
    Ok(())
}

#[tokio::test]
async fn test_win_and_challenge_from_one_line() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_day(dir.path(), "2026-02-14", "Shipped v2 but CI is blocked\n");
    let pipeline = journal_pipeline(dir.path());

    let report = pipeline.run(RunMode::Journal).await?;

    assert_eq!(report.category(Category::Win).created, 1);
    assert_eq!(report.category(Category::Challenge).created, 1);
    assert_eq!(pipeline.store().count(Table::Wins).await?, 1);
    assert_eq!(pipeline.store().count(Table::Challenges).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_work_hours_requires_vocabulary_and_number() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_day(
        dir.path(),
        "2026-02-14",
        "Worked all afternoon on the parser\nSlept 9 hours\nCoding for 6 hours straight\n",
    );
    let pipeline = journal_pipeline(dir.path());

    let report = pipeline.run(RunMode::Journal).await?;

    assert_eq!(report.category(Category::WorkHours).created, 1);
    let stored = pipeline
        .store()
        .find_one(
            Table::WorkHours,
            &KeyPredicate::new()
                .eq("date", lifeos_domain::FieldValue::Date("2026-02-14".parse()?))
                .eq("hours", lifeos_domain::FieldValue::Number(6.0)),
        )
        .await?;
    assert!(stored.is_some());
    Ok(())
}

#[tokio::test]
async fn test_one_walk_per_day() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_day(
        dir.path(),
        "2026-02-14",
        "Walked Bailey before breakfast\nBailey dragged me on a second walk at night\n",
    );
    let pipeline = journal_pipeline(dir.path());

    let report = pipeline.run(RunMode::Journal).await?;

    assert_eq!(report.category(Category::Walk).created, 1);
    assert_eq!(report.category(Category::Walk).skipped, 1);
    assert_eq!(pipeline.store().count(Table::Walks).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_failed_chunk_does_not_stop_later_chunks() -> anyhow::Result<()> {
    let store = FlakyStore::failing_batch(2);
    let importer = BatchImporter::new(&store, 100);

    let outcome = importer.import(Table::Tasks, task_rows(250)).await;

    assert_eq!(outcome.chunks.len(), 3);
    assert_eq!(outcome.imported, 150);
    assert_eq!(outcome.failed(), 100);
    assert_eq!(outcome.failed_chunks(), vec![2]);
    assert_eq!(store.count(Table::Tasks).await?, 150);
    Ok(())
}

#[tokio::test]
async fn test_failed_chunk_reported_by_pipeline() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let tasks: Vec<serde_json::Value> = (0..250)
        .map(|i| json!({"date": "2026-02-14", "task_text": format!("task {}", i)}))
        .collect();
    fs::write(dir.path().join("tasks.json"), serde_json::to_string(&tasks)?)?;

    let config = IngestConfig {
        export_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let store = Arc::new(FlakyStore::failing_batch(2));
    let pipeline = Pipeline::with_shared_store(Arc::clone(&store), config)?;

    let report = pipeline.run(RunMode::Bulk).await?;

    let tally = report.bulk_kind(BulkKind::Tasks);
    assert_eq!(tally.found, 250);
    assert_eq!(tally.imported, 150);
    assert_eq!(tally.failed_chunks, vec![2]);
    assert_eq!(store.count(Table::Tasks).await?, 150);
    Ok(())
}

#[tokio::test]
async fn test_only_decisions_present() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let exports = root.path().join("analysis");
    fs::create_dir(&exports)?;
    fs::write(
        exports.join("decisions.json"),
        r#"[{"date": "2026-02-14", "decision_text": "Hire a contractor"}]"#,
    )?;

    let config = IngestConfig {
        journal_dir: Some(root.path().join("memory")),
        export_dir: Some(exports),
        ..Default::default()
    };
    let pipeline = Pipeline::new(SqliteStore::new(":memory:")?, config)?;

    let report = pipeline.run(RunMode::All).await?;

    assert_eq!(report.bulk_kind(BulkKind::Decisions).imported, 1);
    for kind in [BulkKind::Reminders, BulkKind::Tasks, BulkKind::Transcripts] {
        assert_eq!(report.bulk_kind(kind).imported, 0);
    }
    let skipped: Vec<&str> = report.notices.iter().map(|n| n.source.as_str()).collect();
    assert_eq!(skipped, vec!["journal", "reminders", "tasks", "transcripts"]);
    Ok(())
}

#[tokio::test]
async fn test_transcripts_imported_from_sibling_directory() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let exports = root.path().join("analysis");
    let transcripts = root.path().join("transcripts");
    fs::create_dir(&exports)?;
    fs::create_dir(&transcripts)?;
    fs::write(transcripts.join("2026-02-14-standup.txt"), "we talked about the release plan")?;
    fs::write(transcripts.join("ignored.json"), "{}")?;

    let config = IngestConfig {
        export_dir: Some(exports),
        ..Default::default()
    };
    let pipeline = Pipeline::new(SqliteStore::new(":memory:")?, config)?;

    let report = pipeline.run(RunMode::Bulk).await?;

    assert_eq!(report.bulk_kind(BulkKind::Transcripts).imported, 1);
    let stored = pipeline
        .store()
        .find_one(
            Table::Transcripts,
            &KeyPredicate::new().eq(
                "title",
                lifeos_domain::FieldValue::Text("2026-02-14-standup".into()),
            ),
        )
        .await?
        .expect("transcript stored");
    assert_eq!(stored.row.get("word_count"), Some(&json!(6)));
    assert_eq!(stored.row.get("date"), Some(&json!("2026-02-14")));
    Ok(())
}

#[tokio::test]
async fn test_failed_insert_is_counted_and_run_continues() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    // inserts in order: walk, win, meal
    write_day(
        dir.path(),
        "2026-02-14",
        "Walked Bailey at dawn\nShipped the importer\nHad a salad for lunch\n",
    );
    let config = IngestConfig {
        journal_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let pipeline = Pipeline::new(FlakyStore::failing_insert(2), config)?;

    let report = pipeline.run(RunMode::Journal).await?;

    assert_eq!(report.category(Category::Walk).created, 1);
    assert_eq!(report.category(Category::Win).failed, 1);
    assert_eq!(report.category(Category::Win).created, 0);
    assert_eq!(report.category(Category::Meal).created, 1);
    assert_eq!(report.total_failed(), 1);
    assert_eq!(pipeline.store().count(Table::Wins).await?, 0);
    assert_eq!(pipeline.store().count(Table::Meals).await?, 1);
    Ok(())
}

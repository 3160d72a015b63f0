//! Command implementations.

pub mod classify;
pub mod run;
pub mod status;

pub use self::classify::execute_classify;
pub use self::run::execute_run;
pub use self::status::execute_status;

use crate::cli::Command;
use crate::config::{Config, StoreSettings};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lifeos_domain::RecordStore;
use lifeos_ingest::RunMode;
use lifeos_store::{RestStore, SqliteStore};
use std::fs;
use tracing::debug;

/// Execute a command against the configured store.
///
/// Configuration is checked in full before the store is opened, so a bad
/// config never creates a database file or directory.
pub async fn execute(command: Command, config: Config, formatter: &Formatter) -> Result<()> {
    // dry runs never open the store
    if let Command::Classify(args) = command {
        return execute_classify(args, &config.ingest, formatter);
    }

    if command.run_mode().is_some() {
        config.ingest.validate()?;
    }

    match config.store.clone() {
        StoreSettings::Sqlite { path } => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            debug!("Opening SQLite store at {}", path.display());
            let store = SqliteStore::new(&path).map_err(|e| CliError::Store(e.to_string()))?;
            dispatch(store, command, config, formatter).await
        }
        StoreSettings::Rest { .. } => {
            let rest = config.store.rest_config()?;
            debug!("Opening REST store at {}", rest.url);
            let store = RestStore::new(rest).map_err(|e| CliError::Store(e.to_string()))?;
            dispatch(store, command, config, formatter).await
        }
    }
}

async fn dispatch<S: RecordStore>(
    store: S,
    command: Command,
    config: Config,
    formatter: &Formatter,
) -> Result<()> {
    match command {
        Command::Status => execute_status(store, formatter).await,
        other => {
            let mode = other.run_mode().unwrap_or(RunMode::All);
            execute_run(store, config.ingest, mode, formatter).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn sqlite_config(path: std::path::PathBuf) -> Config {
        Config {
            store: StoreSettings::Sqlite { path },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_bad_ingest_config_touches_no_files() {
        let home = tempfile::tempdir().unwrap();
        let data_dir = home.path().join(".lifeos");
        let config = sqlite_config(data_dir.join("lifeos.db"));
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        for command in [Command::Run, Command::Sync, Command::Import] {
            let result = execute(command, config.clone(), &formatter).await;
            assert!(matches!(result, Err(CliError::Ingest(_))));
        }
        assert!(!data_dir.exists());
    }

    #[tokio::test]
    async fn test_missing_rest_key_touches_no_files() {
        let journal = tempfile::tempdir().unwrap();
        let mut config = Config {
            store: StoreSettings::Rest {
                url: Some("https://x.supabase.co".into()),
                api_key: None,
                timeout_secs: 30,
            },
            ..Default::default()
        };
        config.ingest.journal_dir = Some(journal.path().to_path_buf());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let result = execute(Command::Run, config, &formatter).await;
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[tokio::test]
    async fn test_status_opens_store_without_sources() {
        let home = tempfile::tempdir().unwrap();
        let data_dir = home.path().join(".lifeos");
        let config = sqlite_config(data_dir.join("lifeos.db"));
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute(Command::Status, config, &formatter).await.unwrap();
        assert!(data_dir.join("lifeos.db").exists());
    }
}

//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use lifeos_ingest::IngestConfig;
use lifeos_store::RestConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Pipeline settings
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Record store selection
    #[serde(default)]
    pub store: StoreSettings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Which record store to open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreSettings {
    /// Local SQLite database
    Sqlite {
        /// Database file
        path: PathBuf,
    },
    /// Remote REST store
    Rest {
        /// Base URL
        #[serde(default)]
        url: Option<String>,
        /// Service key
        #[serde(default)]
        api_key: Option<String>,
        /// Per-request timeout in seconds
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

/// Values from flags and environment variables that override the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Journal directory (`LIFEOS_JOURNAL_DIR`)
    pub journal_dir: Option<PathBuf>,
    /// Legacy journal directory (`MEMORY_DIR`), used when `journal_dir` is unset
    pub memory_dir: Option<PathBuf>,
    /// Export directory (`LIFEOS_EXPORT_DIR`)
    pub export_dir: Option<PathBuf>,
    /// Remote store URL (`SUPABASE_URL`)
    pub store_url: Option<String>,
    /// Remote store key (`SUPABASE_SERVICE_ROLE_KEY`)
    pub store_key: Option<String>,
}

impl Config {
    /// Directory holding the default config file and database.
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".lifeos"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; the default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Apply flag and environment overrides.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(dir) = overrides.journal_dir.or(overrides.memory_dir) {
            self.ingest.journal_dir = Some(dir);
        }
        if let Some(dir) = overrides.export_dir {
            self.ingest.export_dir = Some(dir);
        }

        if overrides.store_url.is_none() && overrides.store_key.is_none() {
            return;
        }
        let (url, api_key, timeout_secs) = match &self.store {
            StoreSettings::Rest {
                url,
                api_key,
                timeout_secs,
            } => (url.clone(), api_key.clone(), *timeout_secs),
            StoreSettings::Sqlite { .. } => (None, None, default_timeout_secs()),
        };
        if overrides.store_url.is_none() && url.is_none() {
            // a key alone does not switch away from SQLite
            return;
        }
        self.store = StoreSettings::Rest {
            url: overrides.store_url.or(url),
            api_key: overrides.store_key.or(api_key),
            timeout_secs,
        };
    }
}

impl StoreSettings {
    /// REST client settings, failing when credentials are missing.
    pub fn rest_config(&self) -> Result<RestConfig> {
        match self {
            StoreSettings::Sqlite { .. } => Err(CliError::Config("store kind is sqlite, not rest".into())),
            StoreSettings::Rest {
                url,
                api_key,
                timeout_secs,
            } => {
                let url = url
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .ok_or_else(|| CliError::Config("REST store needs a url (SUPABASE_URL)".into()))?;
                let api_key = api_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
                    CliError::Config("REST store needs an api_key (SUPABASE_SERVICE_ROLE_KEY)".into())
                })?;
                let mut config = RestConfig::new(url, api_key);
                config.timeout_secs = *timeout_secs;
                Ok(config)
            }
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        let path = Config::home()
            .map(|home| home.join("lifeos.db"))
            .unwrap_or_else(|_| PathBuf::from("lifeos.db"));
        StoreSettings::Sqlite { path }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_timeout_secs() -> u64 {
    30
}

//! Run lock - keeps two ingestion runs from interleaving their writes

use crate::IngestError;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Exclusive marker file held for the duration of a run
///
/// The file is removed when the lock is dropped. A lock file left behind by
/// a killed process must be removed by hand.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
}

impl RunLock {
    /// Create the lock file, failing if it already exists
    pub fn acquire(path: &Path) -> Result<Self, IngestError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| IngestError::io(parent, e))?;
            }
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(IngestError::Locked(path.to_path_buf()));
            }
            Err(e) => return Err(IngestError::io(path, e)),
        };
        writeln!(file, "{}", std::process::id()).map_err(|e| IngestError::io(path, e))?;

        debug!("Acquired run lock {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!("Failed to remove run lock {}: {}", self.path.display(), e);
        }
    }
}

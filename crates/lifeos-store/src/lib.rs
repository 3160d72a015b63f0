//! LifeOS Storage Layer
//!
//! Implementations of the `RecordStore` trait from `lifeos-domain`.
//!
//! # Stores
//!
//! - `SqliteStore`: durable local store; one `records` table with JSON payloads
//! - `RestStore`: PostgREST-compatible HTTP store (e.g. a Supabase project)
//!
//! # Examples
//!
//! ```no_run
//! use lifeos_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for record operations
//! ```

#![warn(missing_docs)]

pub mod rest;
pub mod sqlite;

use thiserror::Error;

pub use rest::{RestConfig, RestStore};
pub use sqlite::SqliteStore;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote store answered with a non-success status
    #[error("Store returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Row (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The connection lock was poisoned by a panicking writer
    #[error("Store lock poisoned")]
    LockPoisoned,
}

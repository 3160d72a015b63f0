//! Record identifiers assigned by the store

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a persisted record
///
/// The store owns record identity: ids are assigned on insert and the
/// ingestion pipeline never holds one before a successful insert or a
/// dedup hit. Locally generated ids are UUIDv7 so they sort by creation
/// time; ids returned by a remote store may be any UUID version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u128);

impl RecordId {
    /// Generate a new UUIDv7-based RecordId
    ///
    /// # Examples
    ///
    /// ```
    /// use lifeos_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RecordId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RecordId from a UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use lifeos_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// let parsed = RecordId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid record id '{}': {}", s, e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Big-endian byte form used by the SQLite store
    pub fn to_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// Rebuild an id from its big-endian byte form
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        let arr: [u8; 16] = bytes
            .try_into()
            .map_err(|_| format!("Expected 16 bytes for RecordId, got {}", bytes.len()))?;
        Ok(Self(u128::from_be_bytes(arr)))
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for RecordId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        RecordId::from_string(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_chronological() {
        let id1 = RecordId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = RecordId::new();

        assert!(id1 < id2, "Earlier UUIDv7 should be less than later UUIDv7");
    }

    #[test]
    fn test_record_id_display_and_parse() {
        let id = RecordId::new();
        let id_str = id.to_string();

        assert_eq!(id_str.len(), 36);
        assert_eq!(RecordId::from_string(&id_str).unwrap(), id);
    }

    #[test]
    fn test_parses_remote_v4_ids() {
        let id = RecordId::from_string("3f2b8c1e-9a4d-4e7b-8c2a-1d5e6f7a8b9c").unwrap();
        assert_eq!(id.to_string(), "3f2b8c1e-9a4d-4e7b-8c2a-1d5e6f7a8b9c");
    }

    #[test]
    fn test_record_id_invalid_string() {
        assert!(RecordId::from_string("not-a-valid-uuid").is_err());
        assert!(RecordId::from_string("").is_err());
    }

    #[test]
    fn test_bytes_length_checked() {
        assert!(RecordId::from_bytes(&[0u8; 15]).is_err());
        let id = RecordId::new();
        assert_eq!(RecordId::from_bytes(&id.to_bytes()).unwrap(), id);
    }

    #[test]
    fn test_serde_as_string() {
        let id = RecordId::from_value(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-00000000002a\"");
    }
}

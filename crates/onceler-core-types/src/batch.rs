//! Correlation id for a single migration batch
//!
//! Every lifecycle event emitted while a batch runs carries the same id,
//! so interleaved output from several processes can be told apart.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one `migrate` invocation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    /// Mint a fresh id (UUIDv7, so ids sort by creation time)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an id received from elsewhere (e.g. a parent process)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_ids_are_unique() {
        let a = BatchId::new();
        let b = BatchId::new();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_display_matches_inner() {
        let id = BatchId::from_string("batch-1".to_string());
        assert_eq!(id.to_string(), "batch-1");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = BatchId::from_string("batch-2".to_string());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"batch-2\"");

        let back: BatchId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

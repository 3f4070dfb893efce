//! Migration and ledger data model

use chrono::NaiveDateTime;
use serde::Serialize;

/// A named setup script supplied by the caller.
///
/// Batches run in the order the caller lists them; there is no ordering field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub name: String,
    pub script: String,
}

impl Migration {
    pub fn new(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
        }
    }
}

/// One persisted row of the `migrations` ledger table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub name: String,
    pub hash: String,
    pub created_at: NaiveDateTime,
}

/// What a successful `migrate` call did, names in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrateOutcome {
    /// Executed and recorded by this call
    pub applied: Vec<String>,
    /// Already recorded with a matching hash; not executed
    pub verified: Vec<String>,
}

impl MigrateOutcome {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

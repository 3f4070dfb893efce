//! Read-only views of the migrations ledger
//!
//! Nothing here creates or writes the ledger table; only the migration
//! manager does that.

use chrono::NaiveDateTime;
use onceler_core::errors::{OnceError, OnceErrorKind};
use onceler_core::manager::SELECT_LEDGER_HASH;
use onceler_core::{digest, LedgerEntry, Migration};
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;

use crate::errors::{from_rusqlite, Result};

/// Format SQLite's `datetime('now')` writes
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where a migration stands relative to the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MigrationState {
    /// Recorded with a matching hash
    Applied,
    /// Not recorded yet
    Pending,
    /// Recorded, but the script has changed since
    Modified { recorded: String },
}

/// Status of one migration from a source listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub name: String,
    pub hash: String,
    #[serde(flatten)]
    pub state: MigrationState,
}

/// Whether the `migrations` table exists yet
pub fn ledger_exists(conn: &Connection) -> Result<bool> {
    conn.query_row(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'migrations'",
        [],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(|e| from_rusqlite("ledger_exists", e))
}

/// All ledger rows in application order; empty when the table is absent
pub fn list_entries(conn: &Connection) -> Result<Vec<LedgerEntry>> {
    if !ledger_exists(conn)? {
        return Ok(Vec::new());
    }

    let mut stmt = conn
        .prepare("SELECT id, name, hash, created_at FROM migrations ORDER BY id")
        .map_err(|e| from_rusqlite("list_entries", e))?;
    let raw: Vec<(i64, String, String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))
        .map_err(|e| from_rusqlite("list_entries", e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| from_rusqlite("list_entries", e))?;

    raw.into_iter()
        .map(|(id, name, hash, created_at)| {
            let created_at = NaiveDateTime::parse_from_str(&created_at, CREATED_AT_FORMAT)
                .map_err(|e| {
                    OnceError::new(OnceErrorKind::LedgerCorrupt)
                        .with_op("list_entries")
                        .with_migration(name.clone())
                        .with_message(format!("bad created_at {:?}: {}", created_at, e))
                })?;
            Ok(LedgerEntry {
                id,
                name,
                hash,
                created_at,
            })
        })
        .collect()
}

/// Classify each migration against the ledger without changing anything.
///
/// Uses the same lookup and digest as the manager. Each migration is judged
/// against the persisted ledger only, so a name repeated in `migrations`
/// reports the same state twice.
pub fn status(conn: &Connection, migrations: &[Migration]) -> Result<Vec<MigrationStatus>> {
    let has_ledger = ledger_exists(conn)?;

    migrations
        .iter()
        .map(|migration| {
            let hash = digest(&migration.script);
            let recorded = if has_ledger {
                recorded_hash(conn, &migration.name)?
            } else {
                None
            };

            let state = match recorded {
                None => MigrationState::Pending,
                Some(recorded) if recorded == hash => MigrationState::Applied,
                Some(recorded) => MigrationState::Modified { recorded },
            };

            Ok(MigrationStatus {
                name: migration.name.clone(),
                hash,
                state,
            })
        })
        .collect()
}

fn recorded_hash(conn: &Connection, name: &str) -> Result<Option<String>> {
    conn.query_row(SELECT_LEDGER_HASH, [name], |row| row.get::<_, String>(0))
        .optional()
        .map_err(|e| from_rusqlite("ledger_status", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_table_reads_as_empty() {
        let conn = Connection::open_in_memory().unwrap();

        assert!(!ledger_exists(&conn).unwrap());
        assert!(list_entries(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_status_json_shape() {
        let status = MigrationStatus {
            name: "001".to_string(),
            hash: "abc".to_string(),
            state: MigrationState::Modified {
                recorded: "def".to_string(),
            },
        };

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["name"], "001");
        assert_eq!(json["state"], "modified");
        assert_eq!(json["recorded"], "def");
    }
}

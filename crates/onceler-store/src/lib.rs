//! onceler store - SQLite backing for the migration manager
//!
//! Provides:
//! - [`SqliteSession`]: the `DatabaseSession` contract over a rusqlite connection
//! - Connection open/configure helpers
//! - Read-only ledger inspection and per-migration status
//! - Loading migrations from a directory of `.sql` files

#![allow(clippy::result_large_err)]

pub mod db;
pub mod errors;
pub mod ledger;
pub mod session;
pub mod source;

pub use errors::Result;
pub use session::SqliteSession;

use onceler_core::{MigrateOutcome, Migration, MigrationManager};
use rusqlite::Connection;

/// Apply `migrations` to `conn` as one atomic batch
pub fn migrate(conn: &Connection, migrations: &[Migration]) -> Result<MigrateOutcome> {
    MigrationManager::new(SqliteSession::new(conn)).migrate(migrations)
}

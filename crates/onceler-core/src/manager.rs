//! Migration manager
//!
//! Applies an ordered batch of migrations exactly once each:
//!
//! 1. Ensure the `migrations` ledger table exists (outside the transaction,
//!    create-if-absent, never rolled back).
//! 2. `BEGIN TRANSACTION`.
//! 3. For each migration in input order: hash the script, look up the ledger
//!    row by name, then execute + record (absent), skip (same hash), or fail
//!    as modified (different hash).
//! 4. `COMMIT`; on any failure `ROLLBACK` and return the original error.
//!
//! ## Logging Ownership
//!
//! `migrate` owns the `start` / `end` / `end_error` lifecycle events for the
//! batch. Per-migration decisions are logged at debug level.
//!
//! ## Concurrency
//!
//! Batches are not coordinated across processes. Run migrations from a single
//! writer, or rely on the store's transaction isolation to serialize them.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use onceler_core_types::BatchId;

use crate::digest::digest;
use crate::errors::{MigrationError, Result};
use crate::model::{MigrateOutcome, Migration};
use crate::session::{DatabaseSession, Value};
use crate::{log_op_end, log_op_error, log_op_start};

/// Ledger table DDL, executed before every batch
pub const LEDGER_DDL: &str = include_str!("../sql/migrations_table.sql");

pub const SELECT_LEDGER_HASH: &str = "SELECT hash FROM migrations WHERE name = ?";
pub const INSERT_LEDGER_ROW: &str = "INSERT INTO migrations (name, hash) VALUES (?, ?)";

pub const BEGIN_TRANSACTION: &str = "BEGIN TRANSACTION";
pub const COMMIT: &str = "COMMIT";
pub const ROLLBACK: &str = "ROLLBACK";

/// Hash recorded in the ledger for one migration name
struct RecordedHash {
    hash: String,
}

enum Step {
    Applied,
    Verified,
}

/// Applies migration batches through an exclusively held session
pub struct MigrationManager<S> {
    session: S,
}

impl<S: DatabaseSession> MigrationManager<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    /// Apply every migration not yet in the ledger, as one atomic batch.
    ///
    /// An empty batch is valid and only bootstraps the ledger table.
    ///
    /// ## Errors
    ///
    /// - `MigrationModified`: a recorded migration's script has changed
    /// - `LedgerCorrupt`: the ledger lookup returned a row without a hash
    /// - any error raised by the session, returned exactly as raised
    ///
    /// On error nothing from this batch is left applied (the ledger table
    /// itself may have been created).
    pub fn migrate(&mut self, migrations: &[Migration]) -> Result<MigrateOutcome> {
        let batch_id = BatchId::new();
        log_op_start!("migrate", batch_id = %batch_id, batch_len = migrations.len());
        let start = Instant::now();

        let result = self.migrate_impl(migrations);

        match &result {
            Ok(outcome) => {
                log_op_end!(
                    "migrate",
                    duration_ms = start.elapsed().as_millis() as u64,
                    batch_id = %batch_id,
                    applied = outcome.applied.len(),
                    verified = outcome.verified.len()
                );
            }
            Err(e) => {
                log_op_error!(
                    "migrate",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    batch_id = %batch_id
                );
            }
        }

        result
    }

    fn migrate_impl(&mut self, migrations: &[Migration]) -> Result<MigrateOutcome> {
        self.session.execute(LEDGER_DDL, &[])?;

        self.session.execute(BEGIN_TRANSACTION, &[])?;
        tracing::debug!("transaction started");

        let mut outcome = MigrateOutcome::default();
        let result = self
            .run_batch(migrations, &mut outcome)
            .and_then(|()| self.session.execute(COMMIT, &[]).map(drop));

        match result {
            Ok(()) => {
                tracing::debug!("transaction committed");
                Ok(outcome)
            }
            Err(err) => {
                self.rollback();
                Err(err)
            }
        }
    }

    fn run_batch(&mut self, migrations: &[Migration], outcome: &mut MigrateOutcome) -> Result<()> {
        for migration in migrations {
            match self.apply_or_verify(migration)? {
                Step::Applied => outcome.applied.push(migration.name.clone()),
                Step::Verified => outcome.verified.push(migration.name.clone()),
            }
        }
        Ok(())
    }

    fn apply_or_verify(&mut self, migration: &Migration) -> Result<Step> {
        let hash = digest(&migration.script);

        match self.recorded_hash(&migration.name)? {
            None => {
                self.session.execute(&migration.script, &[])?;
                self.session.execute(
                    INSERT_LEDGER_ROW,
                    &[
                        Value::from(migration.name.as_str()),
                        Value::from(hash.as_str()),
                    ],
                )?;
                tracing::debug!(migration = %migration.name, %hash, "applied");
                Ok(Step::Applied)
            }
            Some(recorded) if recorded.hash == hash => {
                tracing::debug!(migration = %migration.name, "already applied, unchanged");
                Ok(Step::Verified)
            }
            Some(recorded) => Err(MigrationError::Modified {
                name: migration.name.clone(),
                recorded: recorded.hash,
                current: hash,
            }
            .into()),
        }
    }

    fn recorded_hash(&mut self, name: &str) -> Result<Option<RecordedHash>> {
        let rows = self
            .session
            .execute(SELECT_LEDGER_HASH, &[Value::from(name)])?;

        match rows.first() {
            None => Ok(None),
            Some(row) => match row.get_text("hash") {
                Some(hash) => Ok(Some(RecordedHash {
                    hash: hash.to_string(),
                })),
                None => Err(MigrationError::LedgerRowMalformed {
                    name: name.to_string(),
                }
                .into()),
            },
        }
    }

    /// Issue `ROLLBACK`; its own failure is logged, never returned, so the
    /// caller sees the error that caused the rollback.
    fn rollback(&mut self) {
        match self.session.execute(ROLLBACK, &[]) {
            Ok(_) => tracing::debug!("transaction rolled back"),
            Err(e) => tracing::error!(err.code = e.code(), error = %e, "rollback failed"),
        }
    }
}

//! onceler core - exactly-once application of named setup scripts
//!
//! Provides:
//! - [`MigrationManager`]: applies a batch of [`Migration`]s atomically,
//!   skipping recorded ones and refusing ones whose script changed
//! - [`digest()`]: the content fingerprint stored in the ledger
//! - [`DatabaseSession`]: the storage contract the manager drives
//! - Error and logging facilities shared by the other onceler crates
//!
//! Running two batches against the same store at the same time is not
//! guarded here; callers must ensure a single writer.

pub mod digest;
pub mod errors;
pub mod logging_facility;
pub mod manager;
pub mod model;
pub mod session;

pub use digest::digest;
pub use errors::{MigrationError, OnceError, OnceErrorKind, Result};
pub use manager::MigrationManager;
pub use model::{LedgerEntry, MigrateOutcome, Migration};
pub use session::{DatabaseSession, Row, Value};

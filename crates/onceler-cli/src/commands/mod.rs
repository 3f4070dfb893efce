pub mod hash;
pub mod migrate;
pub mod status;

use std::path::PathBuf;

use clap::Args;

/// Database location shared by commands that touch the ledger
#[derive(Debug, Args)]
pub struct DbArgs {
    /// Path to the SQLite database (created if missing)
    #[arg(long, default_value = "onceler.db")]
    pub db: PathBuf,
}

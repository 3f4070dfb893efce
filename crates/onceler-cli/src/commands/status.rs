//! Report migration status without applying anything
//!
//! Usage: onceler status [--db <PATH>] [--json] <DIR>

use clap::Args;
use onceler_store::ledger::{self, MigrationState};
use onceler_store::{db, source};
use std::path::PathBuf;

use super::DbArgs;

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Directory of `.sql` migration files
    pub dir: PathBuf,
}

pub fn execute(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let migrations = source::load_dir(&args.dir)?;
    let conn = db::open(&args.db.db)?;

    let report = ledger::status(&conn, &migrations)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for entry in &report {
        let label = match &entry.state {
            MigrationState::Applied => "applied".to_string(),
            MigrationState::Pending => "pending".to_string(),
            MigrationState::Modified { recorded } => format!("MODIFIED (recorded {})", recorded),
        };
        println!("{:<40} {}", entry.name, label);
    }

    Ok(())
}

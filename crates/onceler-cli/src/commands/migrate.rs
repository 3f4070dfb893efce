//! Apply migrations
//!
//! Usage: onceler migrate [--db <PATH>] <DIR>

use clap::Args;
use onceler_store::{db, source};
use std::path::PathBuf;

use super::DbArgs;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// Directory of `.sql` migration files, applied in file-name order
    pub dir: PathBuf,
}

pub fn execute(args: MigrateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let migrations = source::load_dir(&args.dir)?;

    let conn = db::open(&args.db.db)?;
    db::configure(&conn)?;

    let outcome = onceler_store::migrate(&conn, &migrations)?;

    for name in &outcome.verified {
        println!("= {} (already applied)", name);
    }
    for name in &outcome.applied {
        println!("✓ {}", name);
    }
    println!(
        "{} applied, {} already up to date",
        outcome.applied.len(),
        outcome.verified.len()
    );

    Ok(())
}

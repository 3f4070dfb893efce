//! Print a script's ledger hash
//!
//! Usage: onceler hash <FILE>

use clap::Args;
use onceler_core::digest;
use onceler_store::source;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct HashArgs {
    /// Migration script file
    pub file: PathBuf,
}

pub fn execute(args: HashArgs) -> Result<(), Box<dyn std::error::Error>> {
    let migration = source::load_file(&args.file)?;
    println!("{}  {}", digest(&migration.script), migration.name);
    Ok(())
}

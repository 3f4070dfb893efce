//! onceler CLI
//!
//! Applies a directory of `.sql` migrations to a SQLite database exactly once.

use clap::{Parser, Subcommand, ValueEnum};
use onceler_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "onceler")]
#[command(about = "onceler - exactly-once SQL migrations", long_about = None)]
struct Cli {
    /// Log output format (filter with RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending migrations from a directory
    Migrate(commands::migrate::MigrateArgs),
    /// Show which migrations are applied, pending or modified
    Status(commands::status::StatusArgs),
    /// Print the ledger hash of a script file
    Hash(commands::hash::HashArgs),
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Migrate(args) => commands::migrate::execute(args),
        Commands::Status(args) => commands::status::execute(args),
        Commands::Hash(args) => commands::hash::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! Certiq CLI
//!
//! Command-line interface for the document query engine

use certiq_core::logging_facility::{init, Profile};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "certiq")]
#[command(about = "Certiq - criteria queries over stored documents", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a criteria tree from a root document
    Query(commands::query::QueryArgs),
    /// Fetch and validate a single document
    Fetch(commands::fetch::FetchArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Query(args) => commands::query::execute(args).await,
        Commands::Fetch(args) => commands::fetch::execute(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

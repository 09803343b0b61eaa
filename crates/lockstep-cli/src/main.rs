//! Lockstep CLI
//!
//! Command-line interface for lockstep

use clap::{Parser, Subcommand};
use lockstep_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "lockstep")]
#[command(about = "Lockstep - Exclusive statement execution against snapshot-backed databases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one statement through a full operation cycle
    Exec(commands::exec::ExecArgs),
    /// Lease inspection and repair operations
    Lease(commands::lease::LeaseArgs),
}

fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries the command's own output
    init(Profile::Development);

    let result = match cli.command {
        Commands::Exec(args) => commands::exec::execute(args),
        Commands::Lease(args) => commands::lease::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

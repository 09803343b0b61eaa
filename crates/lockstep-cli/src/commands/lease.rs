//! Lease inspection and repair commands

use clap::{Args, Subcommand};
use lockstep_core::LeaseRecord;
use lockstep_store::{LeaseStore, SqliteLeaseStore};

#[derive(Debug, Args)]
pub struct LeaseArgs {
    #[command(subcommand)]
    pub command: LeaseCommand,
}

#[derive(Debug, Subcommand)]
pub enum LeaseCommand {
    /// Show the current lease record for one resource
    Status(StatusArgs),
    /// List all physically present lease records
    List(ListArgs),
    /// Force-delete a lease record (operator escape hatch)
    Break(BreakArgs),
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Resource whose lease to inspect
    #[arg(long)]
    pub resource: String,

    /// Path of the shared lease database
    #[arg(long)]
    pub lock_db: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Path of the shared lease database
    #[arg(long)]
    pub lock_db: Option<String>,
}

#[derive(Debug, Args)]
pub struct BreakArgs {
    /// Resource whose lease to break
    #[arg(long)]
    pub resource: String,

    /// Path of the shared lease database
    #[arg(long)]
    pub lock_db: Option<String>,
}

pub fn execute(args: LeaseArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        LeaseCommand::Status(status_args) => execute_status(status_args),
        LeaseCommand::List(list_args) => execute_list(list_args),
        LeaseCommand::Break(break_args) => execute_break(break_args),
    }
}

fn execute_status(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::resolve_config(args.lock_db, None, None)?;
    let store = SqliteLeaseStore::open(&config.lock_db_path)?;

    match store.load(&args.resource)? {
        None => println!("no lease for {}", args.resource),
        Some(record) => print_record(&record),
    }
    Ok(())
}

fn execute_list(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::resolve_config(args.lock_db, None, None)?;
    let store = SqliteLeaseStore::open(&config.lock_db_path)?;

    let records = store.list()?;
    if records.is_empty() {
        println!("no lease records");
        return Ok(());
    }

    let now = chrono::Utc::now().timestamp();
    for record in &records {
        let state = if record.is_stale(now) { "stale" } else { "active" };
        println!(
            "{}: {} (holder {}, expiry {})",
            record.resource_id, state, record.holder_id, record.lease_expiry
        );
    }
    Ok(())
}

fn execute_break(args: BreakArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::resolve_config(args.lock_db, None, None)?;
    let store = SqliteLeaseStore::open(&config.lock_db_path)?;

    let now = chrono::Utc::now().timestamp();
    let was_active = store
        .load(&args.resource)?
        .map(|record| !record.is_stale(now))
        .unwrap_or(false);

    if store.force_break(&args.resource)? {
        println!("lease broken for {}", args.resource);
        if was_active {
            println!("  warning: the lease had not expired; its holder may still be mid-cycle");
        }
    } else {
        println!("no lease for {}", args.resource);
    }
    Ok(())
}

fn print_record(record: &LeaseRecord) {
    let now = chrono::Utc::now().timestamp();
    let state = if record.is_stale(now) { "stale" } else { "active" };

    println!("{}: {}", record.resource_id, state);
    println!("  holder_id: {}", record.holder_id);
    match record.expiry_datetime() {
        Some(expiry) => println!("  lease_expiry: {} ({})", record.lease_expiry, expiry),
        None => println!("  lease_expiry: {}", record.lease_expiry),
    }
    if !record.is_stale(now) {
        println!("  remaining_secs: {}", record.remaining_secs(now));
    }
}

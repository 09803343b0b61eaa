//! Exec command: one full copy-modify-write cycle

use clap::Args;
use lockstep_core::{OperationRequest, OperationResult};
use lockstep_engine::commands::operation::{run_operation, OperationOptions};
use lockstep_store::{FsSnapshotStore, SqliteLeaseStore};

#[derive(Debug, Args)]
pub struct ExecArgs {
    /// Statement to run against the resource
    #[arg(long)]
    pub statement: String,

    /// Resource to operate on (defaults to the configured name)
    #[arg(long)]
    pub resource: Option<String>,

    /// Path of the shared lease database
    #[arg(long)]
    pub lock_db: Option<String>,

    /// Root directory of the snapshot store
    #[arg(long)]
    pub store_root: Option<String>,

    /// Lease duration in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub lease_secs: Option<u64>,
}

pub fn execute(args: ExecArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::resolve_config(args.lock_db, args.store_root, args.lease_secs)?;

    let lease_store = SqliteLeaseStore::open(&config.lock_db_path)?;
    let snapshot_store = FsSnapshotStore::new(&config.store_root);

    let request = match args.resource {
        Some(resource) => OperationRequest::for_resource(args.statement, resource),
        None => OperationRequest::new(args.statement),
    };
    let options = OperationOptions::from(&config);

    // The result envelope goes to stdout in both directions; the exit code
    // and stderr carry the failure signal
    match run_operation(&request, &options, &lease_store, &snapshot_store) {
        Ok(result) => {
            let envelope = result.into_envelope();
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(())
        }
        Err(e) => {
            let envelope = OperationResult::failure(&e);
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Err(Box::new(e))
        }
    }
}

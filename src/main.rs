//! Payment Authorization CLI
//!
//! Loads accounts from CSV, authorizes each payment request in order and
//! writes one outcome row per request to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- accounts.csv requests.csv > outcomes.csv
//! ```
//!
//! # Environment Variables
//!
//! - `DATA_STORE_TYPE`: `Backup` writes debits back to `accounts.csv`; any other
//!   value keeps them in memory
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use log::info;
use payment_authorization::{
    ConfiguredStoreFactory, CsvAccountStore, EnvConfiguration, Error, InMemoryAccountStore,
    PaymentService, Result, ValidatorRegistry, process_requests,
};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(Error::MissingArgument);
    }

    let accounts_path = &args[1];
    let requests_path = &args[2];

    // Read the accounts file once; the primary store starts from the same accounts.
    let backup = CsvAccountStore::open(accounts_path)?;
    let primary = InMemoryAccountStore::from_accounts(backup.accounts().into_iter().cloned());

    let factory = ConfiguredStoreFactory::new(EnvConfiguration, primary, backup);
    info!("Account store: {}", factory.selected_kind());

    let mut service = PaymentService::new(factory, ValidatorRegistry::default());

    let requests = BufReader::new(File::open(requests_path)?);
    let stdout = io::stdout();
    let summary = process_requests(&mut service, requests, stdout.lock())?;

    info!(
        "Processed requests: {} authorized, {} rejected, {} skipped",
        summary.authorized, summary.rejected, summary.skipped
    );

    Ok(())
}

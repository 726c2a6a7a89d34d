//! Tracker demo entry point.
//!
//! # Responsibility
//! - Wire config, logging, database bootstrap and the parcel service.
//! - Walk one parcel through its lifecycle and print each step.

use parcel_core::db::open_db;
use parcel_core::{
    core_version, init_logging, ClientId, ParcelService, SqliteParcelRepository, TrackerConfig,
};
use std::error::Error;
use std::process::ExitCode;

const DEMO_CLIENT: ClientId = 1;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("parcel_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = TrackerConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }

    println!("parcel_core version={}", core_version());

    let conn = open_db(&config.db_path)?;
    let service = ParcelService::new(SqliteParcelRepository::try_new(&conn)?);

    let parcel = service.register(DEMO_CLIENT, "Pskov, Voennaya ul., d. 625")?;
    println!("registered {parcel}");
    print_client_parcels(&service, DEMO_CLIENT)?;

    service.change_address(parcel.number, "Saratov, Vesnyanka, d. 4")?;
    println!("address now: {}", service.parcel(parcel.number)?.address);

    match service.next_status(parcel.number)? {
        Some(status) => println!("parcel #{} moved to {status}", parcel.number),
        None => println!("parcel #{} is already final", parcel.number),
    }

    // Not registered any more, so this leaves the address as is.
    service.change_address(parcel.number, "Moscow, Red Square, d. 1")?;
    print_client_parcels(&service, DEMO_CLIENT)?;

    let draft = service.register(DEMO_CLIENT, "Kazan, Baumana ul., d. 1")?;
    service.delete(draft.number)?;
    println!("deleted draft parcel #{}", draft.number);

    print_client_parcels(&service, DEMO_CLIENT)?;
    Ok(())
}

fn print_client_parcels(
    service: &ParcelService<SqliteParcelRepository<'_>>,
    client: ClientId,
) -> Result<(), Box<dyn Error>> {
    let parcels = service.client_parcels(client)?;
    println!("client {client} has {} parcel(s)", parcels.len());
    for parcel in parcels {
        println!("  {parcel}");
    }
    Ok(())
}

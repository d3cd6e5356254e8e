//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `hwfl_core` linkage without the Flutter/FFI runtime.
//! - Optionally open a journal database and print what it holds.

use hwfl_core::db::open_db;
use hwfl_core::{EntryStore, SqliteKvStore, StoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("hwfl_core ping={}", hwfl_core::ping());
    println!("hwfl_core version={}", hwfl_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match print_entries(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hwfl_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_entries(db_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let store = EntryStore::from_backend(SqliteKvStore::try_new(&conn)?, StoreConfig::from_env());

    let entries = store.list();
    println!("entries={}", entries.len());
    for entry in entries {
        println!("{} id={} chars={}", entry.date, entry.id, entry.text.chars().count());
    }
    Ok(())
}

//! Parcel table bootstrap.
//!
//! # Invariants
//! - `schema.sql` is idempotent and the only schema this crate knows.
//! - `PRAGMA user_version` equals `SCHEMA_VERSION` once applied.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Schema version written after `schema.sql` succeeds.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates the `parcel` table and its index unless already present.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: SCHEMA_VERSION,
        });
    }

    conn.execute_batch(SCHEMA_SQL)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

    info!("event=db_schema module=db status=ok previous_version={found} version={SCHEMA_VERSION}");
    Ok(())
}

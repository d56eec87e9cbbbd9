//! Ordered schema migrations for the settings database.
//!
//! # Invariants
//! - `MIGRATIONS` is sorted by strictly increasing `version`.
//! - `PRAGMA user_version` equals the last applied migration.
//! - All pending migrations commit together or not at all.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "settings",
    sql: include_str!("0001_settings.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the schema up to `latest_version()`.
///
/// Returns the schema version the connection ends at.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
/// - SQLite errors roll the whole upgrade back.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<u32> {
    let from_version = read_user_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending = pending_after(from_version);
    if pending.is_empty() {
        debug!("event=db_migrate module=db status=skipped version={from_version}");
        return Ok(from_version);
    }

    let tx = conn.transaction()?;
    for migration in pending {
        run_step(&tx, migration)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={} steps={}",
        from_version,
        latest,
        pending.len()
    );
    Ok(latest)
}

fn pending_after(version: u32) -> &'static [Migration] {
    let first_pending = MIGRATIONS.partition_point(|migration| migration.version <= version);
    &MIGRATIONS[first_pending..]
}

fn run_step(tx: &Transaction<'_>, migration: &Migration) -> DbResult<()> {
    tx.execute_batch(migration.sql)?;
    tx.pragma_update(None, "user_version", migration.version)?;
    debug!(
        "event=db_migrate_step module=db status=ok version={} name={}",
        migration.version, migration.name
    );
    Ok(())
}

fn read_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

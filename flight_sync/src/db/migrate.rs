//! Embedded schema migrations.

use anyhow::anyhow;
use diesel::{Connection, SqliteConnection, connection::SimpleConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::db::sqlite_path;

/// Embedded Diesel migrations bundled with this crate.
///
/// Creates the `airline`, `aircraft`, `itinerary`, `price` and `flight_leg` tables.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Runs pending Diesel migrations on a SQLite database at the given URL.
///
/// Sets the journal mode to WAL first; returns the number of migrations applied.
pub fn run_sqlite(database_url: &str) -> anyhow::Result<usize> {
    let mut conn = SqliteConnection::establish(sqlite_path(database_url))?;
    conn.batch_execute("PRAGMA journal_mode=WAL;")?;
    run_pending(&mut conn)
}

/// Applies pending migrations on an already open connection.
pub fn run_pending(conn: &mut SqliteConnection) -> anyhow::Result<usize> {
    let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| anyhow!(e))?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(applied.len())
}

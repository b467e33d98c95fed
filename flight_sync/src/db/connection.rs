//! SQLite connection helpers.
//!
//! Provides [`connect_sqlite`] that opens a connection and applies the PRAGMAs the
//! writer relies on: WAL journaling, foreign_keys=ON (so `price`/`flight_leg` rows
//! cannot reference a missing itinerary), and a 5000ms busy_timeout.

use anyhow::Context;
use diesel::{Connection, RunQueryDsl, SqliteConnection, sql_query};

use crate::db::{migrate, sqlite_path};

/// Open a SQLite connection and apply connection-wide PRAGMAs.
pub fn connect_sqlite(database_url: &str) -> anyhow::Result<SqliteConnection> {
    let path = sqlite_path(database_url);
    let mut conn = SqliteConnection::establish(path)
        .with_context(|| format!("open sqlite database {path}"))?;

    sql_query("PRAGMA journal_mode=WAL;").execute(&mut conn)?;
    sql_query("PRAGMA foreign_keys=ON;").execute(&mut conn)?;
    sql_query("PRAGMA busy_timeout=5000;").execute(&mut conn)?;
    Ok(conn)
}

/// Run pending migrations, then open a tuned connection.
pub fn open_migrated(database_url: &str) -> anyhow::Result<SqliteConnection> {
    migrate::run_sqlite(database_url)?;
    connect_sqlite(database_url)
}

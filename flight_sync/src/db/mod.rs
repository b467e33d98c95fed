//! Database utilities for connections and schema migrations.
//!
//! This module provides:
//! - SQLite connection helpers: [`connection::connect_sqlite`] applies WAL, foreign_keys=ON,
//!   and a 5000ms busy_timeout; [`connection::open_migrated`] also runs pending migrations.
//! - Embedded Diesel migrations: [`migrate::MIGRATIONS`] and [`migrate::run_sqlite`].
//!
//! Database URLs may be bare file paths, `sqlite:` / `sqlite://` prefixed paths, or
//! `:memory:`.
//!
//! Example:
//! ```no_run
//! use flight_sync::db::connection;
//!
//! let db_path = std::env::temp_dir().join("flight_prices_example.db");
//! let _conn = connection::open_migrated(db_path.to_str().unwrap()).expect("open + migrate");
//! ```

pub mod connection;
pub mod migrate;

/// Strips an optional `sqlite://` or `sqlite:` scheme so Diesel gets a plain path.
pub fn sqlite_path(database_url: &str) -> &str {
    database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url)
}

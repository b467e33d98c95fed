//! Airline and aircraft dictionaries.
//!
//! Every search response can carry a `dictionaries` block mapping carrier and
//! aircraft codes to names. Most of it repeats what earlier responses said, so
//! an in-memory [`ReferenceDictionary`] mirrors the stored rows and
//! [`ReferenceDictionary::reconcile`] picks out only the codes that are new or
//! renamed. Those go to storage as one upsert batch per table
//! ([`repo::upsert_batch`]): last write wins, unchanged codes are never written.
//!
//! The snapshot is updated as soon as a batch is computed. If the following
//! write fails the snapshot is ahead of storage until the next
//! [`ReferenceDictionary::load_all`].

mod dictionary;
pub mod repo;

use std::fmt;

use diesel::SqliteConnection;
use offer_client::providers::amadeus::response::Dictionaries;
use tracing::{debug, info};

use crate::error::SyncError;

pub use dictionary::{ReferenceBatch, ReferenceDictionary};

/// The two code → name tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceTable {
    /// Marketing and operating carriers (`dictionaries.carriers`).
    Airline,
    /// Equipment codes (`dictionaries.aircraft`).
    Aircraft,
}

impl ReferenceTable {
    /// Both tables, in sync order.
    pub const ALL: [ReferenceTable; 2] = [ReferenceTable::Airline, ReferenceTable::Aircraft];

    /// SQL table name.
    pub fn table_name(self) -> &'static str {
        match self {
            ReferenceTable::Airline => "airline",
            ReferenceTable::Aircraft => "aircraft",
        }
    }
}

impl fmt::Display for ReferenceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Reconciles a response's dictionaries block and writes what changed.
///
/// Carriers go to `airline`, aircraft to `aircraft`. Returns the number of rows
/// upserted across both tables.
pub fn sync_dictionaries(
    conn: &mut SqliteConnection,
    dictionary: &mut ReferenceDictionary,
    dictionaries: &Dictionaries,
) -> Result<usize, SyncError> {
    let mut written = 0;
    for table in ReferenceTable::ALL {
        let incoming = match table {
            ReferenceTable::Airline => &dictionaries.carriers,
            ReferenceTable::Aircraft => &dictionaries.aircraft,
        };
        let batch = dictionary.reconcile(table, incoming.iter().map(|(c, n)| (c.as_str(), n.as_str())));
        if batch.is_empty() {
            debug!(%table, "dictionary unchanged");
            continue;
        }

        info!(%table, changed = batch.len(), "updating dictionary");
        debug!("{batch}");
        written += repo::upsert_batch(conn, &batch)?;
    }
    Ok(written)
}

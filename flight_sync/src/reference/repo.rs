//! Reference table statements.
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel::{ExpressionMethods, RunQueryDsl, SqliteConnection, insert_into};
use tracing::debug;

use super::{ReferenceBatch, ReferenceTable};
use crate::models::{NewAircraft, NewAirline};
use crate::schema::{aircraft, airline};

/// Rows written per chunk of a batch.
pub const REFERENCE_CHUNK_SIZE: usize = 100;

/// All `(code, name)` rows of `table`.
pub fn load_entries(conn: &mut SqliteConnection, table: ReferenceTable) -> QueryResult<Vec<(String, String)>> {
    match table {
        ReferenceTable::Airline => airline::table
            .select((airline::iata_code, airline::name))
            .load(conn),
        ReferenceTable::Aircraft => aircraft::table
            .select((aircraft::iata_code, aircraft::name))
            .load(conn),
    }
}

/// Writes a batch in chunks of [`REFERENCE_CHUNK_SIZE`], one multi-row
/// `INSERT .. ON CONFLICT DO UPDATE` per chunk, inside one immediate
/// transaction. Either every entry lands or none does.
pub fn upsert_batch(conn: &mut SqliteConnection, batch: &ReferenceBatch) -> QueryResult<usize> {
    if batch.is_empty() {
        return Ok(0);
    }

    conn.immediate_transaction(|conn| {
        let mut written = 0;
        for (i, chunk) in batch.entries.chunks(REFERENCE_CHUNK_SIZE).enumerate() {
            written += match batch.table {
                ReferenceTable::Airline => upsert_airlines(conn, chunk)?,
                ReferenceTable::Aircraft => upsert_aircraft(conn, chunk)?,
            };
            debug!(table = %batch.table, chunk = i, rows = chunk.len(), "upserted chunk");
        }
        Ok(written)
    })
}

fn upsert_airlines(conn: &mut SqliteConnection, chunk: &[(String, String)]) -> QueryResult<usize> {
    let rows: Vec<NewAirline<'_>> = chunk
        .iter()
        .map(|(code, name)| NewAirline {
            iata_code: code,
            name,
        })
        .collect();
    insert_into(airline::table)
        .values(&rows)
        .on_conflict(airline::iata_code)
        .do_update()
        .set(airline::name.eq(excluded(airline::name)))
        .execute(conn)
}

fn upsert_aircraft(conn: &mut SqliteConnection, chunk: &[(String, String)]) -> QueryResult<usize> {
    let rows: Vec<NewAircraft<'_>> = chunk
        .iter()
        .map(|(code, name)| NewAircraft {
            iata_code: code,
            name,
        })
        .collect();
    insert_into(aircraft::table)
        .values(&rows)
        .on_conflict(aircraft::iata_code)
        .do_update()
        .set(aircraft::name.eq(excluded(aircraft::name)))
        .execute(conn)
}

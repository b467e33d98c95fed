#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};
use flight_sync::db::{connection, migrate};
use flight_sync::records::{FlightLegRecord, ItineraryRecord, NormalizedItinerary, PriceRecord};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}
#[derive(QueryableByName)]
struct ForeignKeys {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}
#[derive(QueryableByName)]
struct BusyTimeout {
    #[diesel(sql_type = Integer, column_name = "timeout")]
    busy_timeout: i32,
}
#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = BigInt)]
    n: i64,
}

pub struct TestDb {
    _dir: TempDir,    // keep alive for the life of the test
    pub path: String, // <tmpdir>/test.db
}

pub fn setup_db() -> (TestDb, SqliteConnection) {
    let dir = TempDir::new().expect("tempdir");
    let mut p = PathBuf::from(dir.path());
    p.push("test.db");
    let path = p.to_string_lossy().to_string();

    migrate::run_sqlite(&path).expect("migrations");

    let conn = connection::connect_sqlite(&path).expect("connect");
    (TestDb { _dir: dir, path }, conn)
}

pub fn assert_sqlite_pragmas(conn: &mut SqliteConnection) {
    use diesel::sql_query;

    let jm: JournalMode = sql_query("PRAGMA journal_mode;").get_result(conn).unwrap();
    assert_eq!(jm.journal_mode.to_lowercase(), "wal"); // WAL is persistent per DB file

    let fk: ForeignKeys = sql_query("PRAGMA foreign_keys;").get_result(conn).unwrap();
    assert_eq!(fk.foreign_keys, 1);

    let bt: BusyTimeout = sql_query("PRAGMA busy_timeout;").get_result(conn).unwrap();
    assert_eq!(bt.busy_timeout, 5000);
}

/// Row count of `table`.
pub fn count(conn: &mut SqliteConnection, table: &str) -> i64 {
    let c: Count = diesel::sql_query(format!("SELECT COUNT(*) AS n FROM {table};"))
        .get_result(conn)
        .unwrap();
    c.n
}

pub fn recorded_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 4, 12, 30, 0).unwrap()
}

pub fn leg(departure: &str, arrival: &str, carrier: &str) -> FlightLegRecord {
    FlightLegRecord {
        departure: departure.into(),
        arrival: arrival.into(),
        num_stops: 0,
        airline: carrier.into(),
        flight_number: "100".into(),
        aircraft: Some("738".into()),
        operator: carrier.into(),
        cabin: Some("ECONOMY".into()),
        fare_basis: Some("QVAJZNB3".into()),
        booking_class: Some("Q".into()),
        num_incl_checked_bags: 1,
        incl_checked_bag_lbs: Some(50),
    }
}

/// JFK → ORD → DEN on one carrier, priced at 123.45 USD.
pub fn sample_itinerary() -> NormalizedItinerary {
    NormalizedItinerary {
        itinerary: ItineraryRecord {
            source: "JFK".into(),
            destination: "DEN".into(),
            num_legs: 2,
            airline: Some("AA".into()),
            blacklisted_in_eu: false,
        },
        price: PriceRecord {
            recorded_at: recorded_at(),
            currency: "USD".into(),
            total_price: Decimal::new(12345, 2),
            checked_bag_price: Some(Decimal::new(3500, 2)),
            num_bookable_seats: 7,
        },
        legs: vec![leg("JFK", "ORD", "AA"), leg("ORD", "DEN", "AA")],
    }
}

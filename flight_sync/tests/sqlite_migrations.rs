mod common;
use common::{assert_sqlite_pragmas, setup_db};

use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Integer;
use flight_sync::db::{connection::connect_sqlite, migrate};

#[derive(QueryableByName)]
struct TblCnt {
    #[diesel(sql_type = Integer)]
    cnt: i32,
}

#[test]
fn migrations_apply_and_pragmas_are_set() {
    let (_db, mut conn) = setup_db();

    assert_sqlite_pragmas(&mut conn);

    let tbls: TblCnt = sql_query(
        "SELECT COUNT(*) AS cnt
            FROM sqlite_master
            WHERE type='table'
            AND name IN ('airline','aircraft','itinerary','price','flight_leg');",
    )
    .get_result(&mut conn)
    .unwrap();
    assert_eq!(tbls.cnt, 5, "expected five tables to be present");
}

#[test]
fn second_connection_gets_pragmas_and_nothing_is_pending() {
    let (db, mut conn) = setup_db();

    let mut second = connect_sqlite(&db.path).expect("connect second");
    assert_sqlite_pragmas(&mut second);

    assert_eq!(migrate::run_pending(&mut conn).unwrap(), 0);
}

#[test]
fn check_constraints_reject_impossible_counts() {
    let (_db, mut conn) = setup_db();

    let zero_legs = sql_query(
        "INSERT INTO itinerary (source, destination, num_legs, airline, blacklisted_in_eu)
            VALUES ('JFK', 'LAX', 0, NULL, 0);",
    )
    .execute(&mut conn);
    assert!(zero_legs.is_err(), "num_legs must be at least 1");
}

#[test]
fn price_requires_an_itinerary() {
    let (_db, mut conn) = setup_db();

    let orphan = sql_query(
        "INSERT INTO price (itinerary_id, recorded_at, currency, total_price, checked_bag_price, num_bookable_seats)
            VALUES (999, '2025-01-01T00:00:00.000Z', 'USD', '1.00', NULL, 1);",
    )
    .execute(&mut conn);
    assert!(orphan.is_err(), "foreign_keys=ON must reject orphan prices");
}

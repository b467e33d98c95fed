mod common;

use std::str::FromStr;

use diesel::prelude::*;
use flight_sync::SyncError;
use flight_sync::models::{FlightLegRow, ItineraryRow, PriceRow};
use flight_sync::persist::{write_all, write_itinerary};
use flight_sync::schema::{flight_leg, itinerary, price};
use rust_decimal::Decimal;

#[test]
fn writes_itinerary_price_and_legs() {
    let (_db, mut conn) = common::setup_db();
    let record = common::sample_itinerary();

    let id = write_itinerary(&mut conn, &record).expect("write");

    let it: ItineraryRow = itinerary::table
        .find(id)
        .select(ItineraryRow::as_select())
        .first(&mut conn)
        .unwrap();
    assert_eq!(it.source, "JFK");
    assert_eq!(it.destination, "DEN");
    assert_eq!(it.num_legs, 2);
    assert_eq!(it.airline.as_deref(), Some("AA"));
    assert!(!it.blacklisted_in_eu);

    let legs: Vec<FlightLegRow> = FlightLegRow::belonging_to(&it)
        .select(FlightLegRow::as_select())
        .order(flight_leg::id.asc())
        .load(&mut conn)
        .unwrap();
    let route: Vec<(&str, &str)> = legs
        .iter()
        .map(|l| (l.departure.as_str(), l.arrival.as_str()))
        .collect();
    assert_eq!(route, [("JFK", "ORD"), ("ORD", "DEN")]);
    assert_eq!(legs[0].booking_class.as_deref(), Some("Q"));
    assert_eq!(legs[0].incl_checked_bag_lbs, Some(50));
    assert!(legs.iter().all(|l| l.itinerary_id == id));
}

#[test]
fn decimal_amounts_round_trip_exactly() {
    let (_db, mut conn) = common::setup_db();
    let id = write_itinerary(&mut conn, &common::sample_itinerary()).unwrap();

    let p: PriceRow = price::table
        .filter(price::itinerary_id.eq(id))
        .select(PriceRow::as_select())
        .first(&mut conn)
        .unwrap();

    assert_eq!(p.total_price, "123.45");
    assert_eq!(Decimal::from_str(&p.total_price).unwrap(), Decimal::new(12345, 2));
    assert_eq!(p.checked_bag_price.as_deref(), Some("35.00"));
    assert_eq!(p.recorded_at, "2025-03-04T12:30:00.000Z");
    assert_eq!(p.currency, "USD");
    assert_eq!(p.num_bookable_seats, 7);
}

#[test]
fn mixed_carrier_and_missing_bag_price_store_null() {
    let (_db, mut conn) = common::setup_db();
    let mut record = common::sample_itinerary();
    record.itinerary.airline = None;
    record.price.checked_bag_price = None;
    record.legs[1] = common::leg("ORD", "DEN", "UA");

    let id = write_itinerary(&mut conn, &record).unwrap();

    let airline: Option<String> = itinerary::table
        .find(id)
        .select(itinerary::airline)
        .first(&mut conn)
        .unwrap();
    assert_eq!(airline, None);

    let bag: Option<String> = price::table
        .filter(price::itinerary_id.eq(id))
        .select(price::checked_bag_price)
        .first(&mut conn)
        .unwrap();
    assert_eq!(bag, None);
}

#[test]
fn failing_leg_rolls_back_the_whole_itinerary() {
    let (_db, mut conn) = common::setup_db();
    let mut record = common::sample_itinerary();
    record.legs[1].num_stops = -1; // violates CHECK (num_stops >= 0)

    let err = write_itinerary(&mut conn, &record).unwrap_err();
    assert!(matches!(err, SyncError::Storage(_)), "got {err:?}");

    assert_eq!(common::count(&mut conn, "itinerary"), 0);
    assert_eq!(common::count(&mut conn, "price"), 0);
    assert_eq!(common::count(&mut conn, "flight_leg"), 0);
}

#[test]
fn write_all_keeps_earlier_units_on_failure() {
    let (_db, mut conn) = common::setup_db();
    let good = common::sample_itinerary();
    let mut bad = common::sample_itinerary();
    bad.legs[0].num_incl_checked_bags = -2;

    let ids = write_all(&mut conn, &[good.clone(), good.clone()]).unwrap();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);

    assert!(write_all(&mut conn, &[good, bad]).is_err());
    assert_eq!(common::count(&mut conn, "itinerary"), 3);
    assert_eq!(common::count(&mut conn, "price"), 3);
    assert_eq!(common::count(&mut conn, "flight_leg"), 6);
}

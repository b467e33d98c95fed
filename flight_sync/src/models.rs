//! Diesel models mapping to the database schema.
//!
//! These types mirror the tables defined in the embedded migrations and in
//! [`crate::schema`] for use with Diesel’s Queryable/Insertable APIs:
//! - [`crate::schema::airline`] / [`crate::schema::aircraft`]: code → name dictionaries
//! - [`crate::schema::itinerary`]: one observed routing, root of each write
//! - [`crate::schema::price`]: the price observed for an itinerary at `recorded_at`
//! - [`crate::schema::flight_leg`]: ordered legs of an itinerary
//!
//! Insertables set `treat_none_as_default_value = false` so `None` binds as
//! `NULL`, which lets SQLite take multi-row `VALUES` lists.

use diesel::prelude::*;

use crate::schema::*;

/// Insertable airline dictionary entry.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = airline, treat_none_as_default_value = false)]
pub struct NewAirline<'a> {
    pub iata_code: &'a str,
    pub name: &'a str,
}

/// Insertable aircraft dictionary entry.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = aircraft, treat_none_as_default_value = false)]
pub struct NewAircraft<'a> {
    pub iata_code: &'a str,
    pub name: &'a str,
}

/// A row in [`crate::schema::itinerary`].
#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Selectable)]
#[diesel(table_name = itinerary, check_for_backend(diesel::sqlite::Sqlite))]
pub struct ItineraryRow {
    /// Generated identity (SQLite rowid).
    pub id: i32,
    /// Origin airport code of the search.
    pub source: String,
    /// Arrival airport of the last segment.
    pub destination: String,
    /// Number of legs, at least 1.
    pub num_legs: i32,
    /// Single marketing carrier, or `None` for mixed-carrier itineraries.
    pub airline: Option<String>,
    /// True if any segment is flagged as EU-blacklisted.
    pub blacklisted_in_eu: bool,
}

/// Insertable form of [`ItineraryRow`]; the id is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = itinerary, treat_none_as_default_value = false)]
pub struct NewItinerary<'a> {
    pub source: &'a str,
    pub destination: &'a str,
    pub num_legs: i32,
    pub airline: Option<&'a str>,
    pub blacklisted_in_eu: bool,
}

/// A row in [`crate::schema::price`].
///
/// Amounts are decimal strings and `recorded_at` is RFC3339 UTC text.
#[derive(Debug, Clone, PartialEq, Queryable, Associations, Selectable)]
#[diesel(table_name = price, check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(belongs_to(ItineraryRow, foreign_key = itinerary_id))]
pub struct PriceRow {
    pub itinerary_id: i32,
    pub recorded_at: String,
    pub currency: String,
    pub total_price: String,
    pub checked_bag_price: Option<String>,
    pub num_bookable_seats: i32,
}

/// Insertable form of [`PriceRow`].
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = price, treat_none_as_default_value = false)]
pub struct NewPrice<'a> {
    pub itinerary_id: i32,
    pub recorded_at: &'a str,
    pub currency: &'a str,
    pub total_price: String,
    pub checked_bag_price: Option<String>,
    pub num_bookable_seats: i32,
}

/// A row in [`crate::schema::flight_leg`].
#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Associations, Selectable)]
#[diesel(table_name = flight_leg, check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(belongs_to(ItineraryRow, foreign_key = itinerary_id))]
pub struct FlightLegRow {
    pub id: i32,
    pub itinerary_id: i32,
    pub departure: String,
    pub arrival: String,
    pub num_stops: i32,
    pub airline: String,
    pub flight_number: String,
    pub aircraft: Option<String>,
    pub operator: String,
    pub cabin: Option<String>,
    pub fare_basis: Option<String>,
    #[diesel(column_name = class)]
    pub booking_class: Option<String>,
    pub num_incl_checked_bags: i32,
    pub incl_checked_bag_lbs: Option<i32>,
}

/// Insertable form of [`FlightLegRow`].
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = flight_leg, treat_none_as_default_value = false)]
pub struct NewFlightLeg<'a> {
    pub itinerary_id: i32,
    pub departure: &'a str,
    pub arrival: &'a str,
    pub num_stops: i32,
    pub airline: &'a str,
    pub flight_number: &'a str,
    pub aircraft: Option<&'a str>,
    pub operator: &'a str,
    pub cabin: Option<&'a str>,
    pub fare_basis: Option<&'a str>,
    #[diesel(column_name = class)]
    pub booking_class: Option<&'a str>,
    pub num_incl_checked_bags: i32,
    pub incl_checked_bag_lbs: Option<i32>,
}

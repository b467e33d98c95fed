//! Writes normalized itineraries.
//!
//! Each [`NormalizedItinerary`] is one `BEGIN IMMEDIATE` transaction: the
//! itinerary row (its generated id comes back through `RETURNING`), its price
//! row, then all legs in one multi-row insert. Any failure rolls the unit back,
//! so readers never see an itinerary without its price or legs.

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::{RunQueryDsl, SqliteConnection, insert_into};
use tracing::debug;

use crate::error::SyncError;
use crate::models::{NewFlightLeg, NewItinerary, NewPrice};
use crate::records::{FlightLegRecord, NormalizedItinerary};
use crate::schema::{flight_leg, itinerary, price};

/// Storage form of `recorded_at`: RFC3339, UTC, millisecond precision.
pub fn format_recorded_at(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Persists one itinerary with its price and legs; returns the itinerary id.
pub fn write_itinerary(conn: &mut SqliteConnection, record: &NormalizedItinerary) -> Result<i32, SyncError> {
    let it = &record.itinerary;
    let recorded_at = format_recorded_at(record.price.recorded_at);

    let id = conn.immediate_transaction::<_, diesel::result::Error, _>(|conn| {
        let id: i32 = insert_into(itinerary::table)
            .values(&NewItinerary {
                source: &it.source,
                destination: &it.destination,
                num_legs: it.num_legs,
                airline: it.airline.as_deref(),
                blacklisted_in_eu: it.blacklisted_in_eu,
            })
            .returning(itinerary::id)
            .get_result(conn)?;

        let p = &record.price;
        insert_into(price::table)
            .values(&NewPrice {
                itinerary_id: id,
                recorded_at: &recorded_at,
                currency: &p.currency,
                total_price: p.total_price.to_string(),
                checked_bag_price: p.checked_bag_price.map(|d| d.to_string()),
                num_bookable_seats: p.num_bookable_seats,
            })
            .execute(conn)?;

        let legs: Vec<NewFlightLeg<'_>> = record.legs.iter().map(|leg| new_leg(id, leg)).collect();
        if !legs.is_empty() {
            insert_into(flight_leg::table).values(&legs).execute(conn)?;
        }

        Ok(id)
    })?;

    debug!(id, source = %it.source, destination = %it.destination, legs = record.legs.len(), "wrote itinerary");
    Ok(id)
}

/// Writes each itinerary in its own transaction, stopping at the first failure.
///
/// Itineraries written before the failure stay committed.
pub fn write_all(conn: &mut SqliteConnection, records: &[NormalizedItinerary]) -> Result<Vec<i32>, SyncError> {
    records.iter().map(|r| write_itinerary(conn, r)).collect()
}

fn new_leg(itinerary_id: i32, leg: &FlightLegRecord) -> NewFlightLeg<'_> {
    NewFlightLeg {
        itinerary_id,
        departure: &leg.departure,
        arrival: &leg.arrival,
        num_stops: leg.num_stops,
        airline: &leg.airline,
        flight_number: &leg.flight_number,
        aircraft: leg.aircraft.as_deref(),
        operator: &leg.operator,
        cabin: leg.cabin.as_deref(),
        fare_basis: leg.fare_basis.as_deref(),
        booking_class: leg.booking_class.as_deref(),
        num_incl_checked_bags: leg.num_incl_checked_bags,
        incl_checked_bag_lbs: leg.incl_checked_bag_lbs,
    }
}

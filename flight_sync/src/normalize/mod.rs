//! Flight-offer normalization.
//!
//! Turns one upstream [`FlightOffer`] into storage-ready
//! [`NormalizedItinerary`] values, one per itinerary that has at least one
//! segment, in offer order:
//!
//! - `destination` is the arrival airport of the last segment.
//! - `airline` is the first segment's carrier, or `None` as soon as any other
//!   segment names a different carrier.
//! - `blacklisted_in_eu` is set if any segment carries the flag.
//! - Traveler fare details are merged onto segments by id (see [`merge`]), and
//!   every merged segment becomes a leg, in segment order.
//! - Prices are exact decimals. The checked-bag price comes from the
//!   `CHECKED_BAGS` additional service; with several such lines the last one wins.

pub mod baggage;
pub mod merge;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use offer_client::providers::amadeus::response::{FlightOffer, Segment};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::records::{FlightLegRecord, ItineraryRecord, NormalizedItinerary, PriceRecord};
use baggage::normalize_checked_bags;
use merge::{MergedSegment, merge_fare_details};

/// A required offer field could not be turned into a record.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The offer is missing a required field or has one of the wrong type.
    #[error("offer does not decode: {0}")]
    Decode(#[from] serde_json::Error),

    /// An amount string that is not an exact decimal.
    #[error("{field} is not a decimal amount: {value:?}")]
    InvalidDecimal {
        field: &'static str,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },

    /// A count that does not fit the storage column.
    #[error("{field} count {count} is out of range")]
    CountOutOfRange { field: &'static str, count: usize },
}

/// Normalizes every itinerary of `offer`.
///
/// `source` is the origin airport the search was issued for and `recorded_at`
/// the capture time shared by all resulting price rows. Itineraries without
/// segments are skipped.
pub fn normalize_offer(
    offer: &FlightOffer,
    source: &str,
    recorded_at: DateTime<Utc>,
) -> Result<Vec<NormalizedItinerary>, NormalizeError> {
    let price = price_record(offer, recorded_at)?;

    let mut out = Vec::with_capacity(offer.itineraries.len());
    for (index, itinerary) in offer.itineraries.iter().enumerate() {
        let segments = itinerary.segments.as_slice();
        let Some(last) = segments.last() else {
            debug!(index, "skipping itinerary without segments");
            continue;
        };

        let details = offer
            .traveler_pricings
            .iter()
            .flat_map(|tp| &tp.fare_details_by_segment);
        let legs = merge_fare_details(segments, details)
            .iter()
            .map(leg_record)
            .collect::<Result<Vec<_>, _>>()?;

        out.push(NormalizedItinerary {
            itinerary: ItineraryRecord {
                source: source.to_string(),
                destination: last.arrival.iata_code.clone(),
                num_legs: count(segments.len(), "segment")?,
                airline: single_carrier(segments),
                blacklisted_in_eu: segments.iter().any(|s| s.blacklisted_in_eu),
            },
            price: price.clone(),
            legs,
        });
    }

    Ok(out)
}

/// The shared carrier code, or `None` for a mixed-carrier itinerary.
fn single_carrier(segments: &[Segment]) -> Option<String> {
    let first = segments.first()?;
    segments
        .iter()
        .all(|s| s.carrier_code == first.carrier_code)
        .then(|| first.carrier_code.clone())
}

fn price_record(offer: &FlightOffer, recorded_at: DateTime<Utc>) -> Result<PriceRecord, NormalizeError> {
    let total_price = parse_amount("grandTotal", &offer.price.grand_total)?;

    let mut checked_bag_price = None;
    let mut bag_lines = 0usize;
    for service in offer.price.additional_services.iter().filter(|s| s.is_checked_bags()) {
        bag_lines += 1;
        checked_bag_price = Some(parse_amount("additionalServices.amount", &service.amount)?);
    }
    if bag_lines > 1 {
        warn!(bag_lines, "several checked-bag service lines, keeping the last");
    }

    Ok(PriceRecord {
        recorded_at,
        currency: offer.price.currency.clone(),
        total_price,
        checked_bag_price,
        num_bookable_seats: offer.number_of_bookable_seats,
    })
}

fn leg_record(merged: &MergedSegment<'_>) -> Result<FlightLegRecord, NormalizeError> {
    let segment = merged.segment;
    let fares = &merged.fares;
    let bags = normalize_checked_bags(fares.included_checked_bags.as_ref());

    Ok(FlightLegRecord {
        departure: segment.departure.iata_code.clone(),
        arrival: segment.arrival.iata_code.clone(),
        num_stops: count(segment.stops.len(), "stop")?,
        airline: segment.carrier_code.clone(),
        flight_number: segment.number.clone(),
        aircraft: segment.aircraft.as_ref().map(|a| a.code.clone()),
        operator: segment
            .operating
            .as_ref()
            .map_or_else(|| segment.carrier_code.clone(), |op| op.carrier_code.clone()),
        cabin: fares.cabin.clone(),
        fare_basis: fares.fare_basis.clone(),
        booking_class: fares.booking_class.clone(),
        num_incl_checked_bags: bags.num_bags,
        incl_checked_bag_lbs: bags.lbs,
    })
}

/// Parses an amount without going through binary floating point.
fn parse_amount(field: &'static str, value: &str) -> Result<Decimal, NormalizeError> {
    Decimal::from_str_exact(value.trim())
        .or_else(|_| Decimal::from_str(value.trim()))
        .map_err(|source| NormalizeError::InvalidDecimal {
            field,
            value: value.to_string(),
            source,
        })
}

fn count(len: usize, field: &'static str) -> Result<i32, NormalizeError> {
    i32::try_from(len).map_err(|_| NormalizeError::CountOutOfRange { field, count: len })
}

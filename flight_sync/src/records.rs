//! Storage-ready records produced by the normalizer.
//!
//! One [`NormalizedItinerary`] is one unit of work for
//! [`persist::write_itinerary`](crate::persist::write_itinerary): the itinerary row,
//! its price row and its ordered legs. The itinerary id is not known until the row
//! is inserted, so none of these types carry it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Itinerary-level facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryRecord {
    pub source: String,
    pub destination: String,
    pub num_legs: i32,
    /// `None` when the segments mix carriers.
    pub airline: Option<String>,
    pub blacklisted_in_eu: bool,
}

/// Price observed for an itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRecord {
    /// Capture time, shared by every itinerary of one response.
    pub recorded_at: DateTime<Utc>,
    pub currency: String,
    pub total_price: Decimal,
    pub checked_bag_price: Option<Decimal>,
    pub num_bookable_seats: i32,
}

/// A segment after fare details were merged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightLegRecord {
    pub departure: String,
    pub arrival: String,
    pub num_stops: i32,
    pub airline: String,
    pub flight_number: String,
    pub aircraft: Option<String>,
    /// Operating carrier; the marketing carrier when none is given.
    pub operator: String,
    pub cabin: Option<String>,
    pub fare_basis: Option<String>,
    pub booking_class: Option<String>,
    pub num_incl_checked_bags: i32,
    pub incl_checked_bag_lbs: Option<i32>,
}

/// Everything written for one itinerary, in one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedItinerary {
    pub itinerary: ItineraryRecord,
    pub price: PriceRecord,
    /// Segment order.
    pub legs: Vec<FlightLegRecord>,
}

//! Joins traveler fare details onto the segments they reference.
//!
//! The search response carries routing data on `itineraries[].segments[]` and
//! cabin/fare-basis/class/baggage on `travelerPricings[].fareDetailsBySegment[]`,
//! linked by segment id. Merging is a typed overlay: a field present in a fare
//! detail replaces what earlier details set, an absent field leaves it alone.

use std::collections::HashMap;

use offer_client::providers::amadeus::response::{CheckedBags, FareDetail, Segment};
use tracing::trace;

/// Fare-level fields of one leg.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FareFields {
    pub cabin: Option<String>,
    pub fare_basis: Option<String>,
    pub booking_class: Option<String>,
    pub included_checked_bags: Option<CheckedBags>,
}

impl FareFields {
    /// Returns `self` with every field that `detail` carries replaced by it.
    pub fn overlay(self, detail: &FareDetail) -> Self {
        Self {
            cabin: detail.cabin.clone().or(self.cabin),
            fare_basis: detail.fare_basis.clone().or(self.fare_basis),
            booking_class: detail.booking_class.clone().or(self.booking_class),
            included_checked_bags: detail
                .included_checked_bags
                .clone()
                .or(self.included_checked_bags),
        }
    }
}

/// A segment together with the fare fields merged onto it.
#[derive(Debug, Clone)]
pub struct MergedSegment<'a> {
    pub segment: &'a Segment,
    pub fares: FareFields,
}

/// Merges `details` onto `segments`, preserving segment order.
///
/// Details that reference a segment id not in `segments` are ignored.
pub fn merge_fare_details<'s, 'd>(
    segments: &'s [Segment],
    details: impl IntoIterator<Item = &'d FareDetail>,
) -> Vec<MergedSegment<'s>> {
    let mut merged: Vec<MergedSegment<'s>> = segments
        .iter()
        .map(|segment| MergedSegment {
            segment,
            fares: FareFields::default(),
        })
        .collect();

    let by_id: HashMap<&str, usize> = segments
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.as_str(), i))
        .collect();

    for detail in details {
        match by_id.get(detail.segment_id.as_str()) {
            Some(&i) => {
                let entry = &mut merged[i];
                entry.fares = std::mem::take(&mut entry.fares).overlay(detail);
            }
            None => trace!(segment_id = %detail.segment_id, "fare detail for another itinerary"),
        }
    }

    merged
}

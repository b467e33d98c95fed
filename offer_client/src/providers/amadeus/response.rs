//! Wire types for the flight-offers search and direct-destinations endpoints.
//!
//! Required upstream fields are plain fields, so a payload without them fails
//! to decode. Optional fields are `Option` or defaulted collections and are
//! converted here, once; downstream code never checks raw presence.
//!
//! Search results keep each offer as raw JSON until [`FlightOffersResponse::offers`]
//! decodes it, so one broken offer does not take the rest of the response with it.

use indexmap::IndexMap;
use serde::{Deserialize, de::IgnoredAny};
use serde_json::Value;

/// `GET /v2/shopping/flight-offers`
#[derive(Deserialize, Debug, Clone, Default)]
pub struct FlightOffersResponse {
    #[serde(default)]
    pub data: Vec<Value>,
    pub dictionaries: Option<Dictionaries>,
}

impl FlightOffersResponse {
    /// Decodes each offer on its own, in response order.
    pub fn offers(&self) -> impl Iterator<Item = Result<FlightOffer, serde_json::Error>> + '_ {
        self.data.iter().map(FlightOffer::deserialize)
    }
}

/// Code-to-name lookups embedded in a search response.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Dictionaries {
    #[serde(default)]
    pub carriers: IndexMap<String, String>,
    #[serde(default)]
    pub aircraft: IndexMap<String, String>,
}

/// One priced proposal.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub number_of_bookable_seats: i32,
    pub price: OfferPrice,
    pub itineraries: Vec<Itinerary>,
    #[serde(default)]
    pub traveler_pricings: Vec<TravelerPricing>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OfferPrice {
    pub currency: String,
    /// Decimal string, e.g. `"123.45"`.
    pub grand_total: String,
    #[serde(default)]
    pub additional_services: Vec<AdditionalService>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AdditionalService {
    #[serde(rename = "type")]
    pub service_type: String,
    /// Decimal string.
    pub amount: String,
}

impl AdditionalService {
    pub const CHECKED_BAGS: &'static str = "CHECKED_BAGS";

    pub fn is_checked_bags(&self) -> bool {
        self.service_type == Self::CHECKED_BAGS
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Itinerary {
    pub segments: Vec<Segment>,
}

/// One flight hop, before fare details are merged in.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub departure: Endpoint,
    pub arrival: Endpoint,
    pub carrier_code: String,
    pub number: String,
    pub aircraft: Option<AircraftRef>,
    pub operating: Option<OperatingCarrier>,
    /// Only the count matters downstream.
    #[serde(default)]
    pub stops: Vec<IgnoredAny>,
    #[serde(default, rename = "blacklistedInEU")]
    pub blacklisted_in_eu: bool,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub iata_code: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AircraftRef {
    pub code: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OperatingCarrier {
    pub carrier_code: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TravelerPricing {
    #[serde(default)]
    pub fare_details_by_segment: Vec<FareDetail>,
}

/// Per-traveler fare data for one segment, joined to [`Segment::id`] by `segment_id`.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FareDetail {
    pub segment_id: String,
    pub cabin: Option<String>,
    pub fare_basis: Option<String>,
    #[serde(rename = "class")]
    pub booking_class: Option<String>,
    pub included_checked_bags: Option<CheckedBags>,
}

/// Included checked-baggage allowance.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckedBags {
    pub quantity: Option<i32>,
    pub weight: Option<f64>,
    pub weight_unit: Option<String>,
}

/// `GET /v1/airport/direct-destinations`
#[derive(Deserialize, Debug, Clone, Default)]
pub struct DirectDestinationsResponse {
    #[serde(default)]
    pub data: Vec<Destination>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub iata_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_search_payload() {
        let body = json!({
            "data": [{
                "numberOfBookableSeats": 9,
                "price": {
                    "currency": "USD",
                    "grandTotal": "123.45",
                    "additionalServices": [{"type": "CHECKED_BAGS", "amount": "30.00"}]
                },
                "itineraries": [{
                    "duration": "PT2H",
                    "segments": [{
                        "id": "1",
                        "departure": {"iataCode": "JFK", "at": "2025-01-01T10:00:00"},
                        "arrival": {"iataCode": "BOS"},
                        "carrierCode": "B6",
                        "number": "100",
                        "aircraft": {"code": "320"},
                        "stops": [{"iataCode": "PVD"}],
                        "blacklistedInEU": false
                    }]
                }],
                "travelerPricings": [{
                    "travelerId": "1",
                    "fareDetailsBySegment": [{
                        "segmentId": "1",
                        "cabin": "ECONOMY",
                        "class": "Y",
                        "includedCheckedBags": {"quantity": 1}
                    }]
                }]
            }],
            "dictionaries": {"carriers": {"B6": "JETBLUE AIRWAYS"}}
        });

        let parsed: FlightOffersResponse = serde_json::from_value(body).unwrap();
        let offers: Vec<FlightOffer> = parsed.offers().collect::<Result<_, _>>().unwrap();
        let offer = &offers[0];
        assert_eq!(offer.number_of_bookable_seats, 9);
        assert!(offer.price.additional_services[0].is_checked_bags());

        let seg = &offer.itineraries[0].segments[0];
        assert_eq!(seg.stops.len(), 1);
        assert!(seg.operating.is_none());

        let fd = &offer.traveler_pricings[0].fare_details_by_segment[0];
        assert_eq!(fd.booking_class.as_deref(), Some("Y"));
        assert_eq!(fd.fare_basis, None);

        let dict = parsed.dictionaries.unwrap();
        assert_eq!(dict.carriers["B6"], "JETBLUE AIRWAYS");
        assert!(dict.aircraft.is_empty());
    }

    #[test]
    fn missing_grand_total_fails_only_that_offer() {
        let body = json!({
            "data": [
                {"numberOfBookableSeats": 1, "price": {"currency": "USD"}, "itineraries": []},
                {"numberOfBookableSeats": 2, "price": {"currency": "USD", "grandTotal": "9.99"}, "itineraries": []}
            ],
            "dictionaries": {"carriers": {"UA": "UNITED AIRLINES"}}
        });
        let parsed: FlightOffersResponse = serde_json::from_value(body).unwrap();
        let offers: Vec<_> = parsed.offers().collect();

        assert_eq!(offers.len(), 2);
        let err = offers[0].as_ref().unwrap_err();
        assert!(err.to_string().contains("grandTotal"), "{err}");
        assert_eq!(offers[1].as_ref().unwrap().price.grand_total, "9.99");
        assert_eq!(parsed.dictionaries.unwrap().carriers["UA"], "UNITED AIRLINES");
    }

    #[test]
    fn empty_body_is_empty_response() {
        let parsed: FlightOffersResponse = serde_json::from_value(json!({})).unwrap();
        assert!(parsed.data.is_empty());
        assert!(parsed.dictionaries.is_none());
    }
}

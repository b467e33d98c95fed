use chrono::NaiveDate;
use serde::Serialize;

/// Query for `GET /v1/airport/direct-destinations`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectDestinationsQuery<'a> {
    pub departure_airport_code: &'a str,
}

/// Query for `GET /v2/shopping/flight-offers` (one-way search).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOfferQuery {
    pub origin_location_code: String,
    pub destination_location_code: String,
    /// Serialized as `YYYY-MM-DD`.
    pub departure_date: NaiveDate,
    pub adults: u32,
    pub currency_code: String,
}

impl FlightOfferQuery {
    /// One adult, priced in `currency`.
    pub fn one_way(origin: &str, destination: &str, departure_date: NaiveDate, currency: &str) -> Self {
        Self {
            origin_location_code: origin.to_string(),
            destination_location_code: destination.to_string(),
            departure_date,
            adults: 1,
            currency_code: currency.to_string(),
        }
    }

    pub fn with_adults(mut self, adults: u32) -> Self {
        self.adults = adults;
        self
    }
}

use async_trait::async_trait;
use tracing::debug;

use crate::{
    client::AuthenticatedClient,
    errors::ClientError,
    providers::{
        OfferSource,
        amadeus::{
            params::{DirectDestinationsQuery, FlightOfferQuery},
            response::{DirectDestinationsResponse, FlightOffersResponse},
        },
    },
};

/// Self-service test environment.
pub const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";

/// Path of the client-credentials token endpoint, relative to the base URL.
pub const TOKEN_PATH: &str = "/v1/security/oauth2/token";

const DIRECT_DESTINATIONS_PATH: &str = "/v1/airport/direct-destinations";
const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";

/// [`OfferSource`] backed by the Amadeus self-service REST API.
pub struct AmadeusSource {
    client: AuthenticatedClient,
    base_url: String,
}

impl AmadeusSource {
    pub fn new(client: AuthenticatedClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn client(&self) -> &AuthenticatedClient {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl OfferSource for AmadeusSource {
    async fn direct_destinations(&self, origin: &str) -> Result<Vec<String>, ClientError> {
        let query = DirectDestinationsQuery {
            departure_airport_code: origin,
        };
        let response: DirectDestinationsResponse = self
            .client
            .get_as(&self.url(DIRECT_DESTINATIONS_PATH), &query)
            .await?;

        debug!(origin, count = response.data.len(), "direct destinations");
        Ok(response.data.into_iter().map(|d| d.iata_code).collect())
    }

    async fn flight_offers(
        &self,
        query: &FlightOfferQuery,
    ) -> Result<FlightOffersResponse, ClientError> {
        let response: FlightOffersResponse = self
            .client
            .get_as(&self.url(FLIGHT_OFFERS_PATH), query)
            .await?;

        debug!(
            origin = %query.origin_location_code,
            destination = %query.destination_location_code,
            date = %query.departure_date,
            offers = response.data.len(),
            "flight offers"
        );
        Ok(response)
    }
}

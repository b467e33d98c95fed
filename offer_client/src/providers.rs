//! Source abstraction for flight-offer data.
//!
//! This module defines the [`OfferSource`] trait, the interface the scrape
//! driver uses to ask an upstream for the airports reachable from an origin
//! and for priced offers on one route and date.
//!
//! [`amadeus::AmadeusSource`] is the production implementation. Tests and
//! offline runs can supply their own implementation.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use offer_client::errors::ClientError;
//! use offer_client::providers::OfferSource;
//! use offer_client::providers::amadeus::{FlightOfferQuery, response::FlightOffersResponse};
//!
//! struct NoFlights;
//!
//! #[async_trait]
//! impl OfferSource for NoFlights {
//!     async fn direct_destinations(&self, _origin: &str) -> Result<Vec<String>, ClientError> {
//!         Ok(vec![])
//!     }
//!
//!     async fn flight_offers(
//!         &self,
//!         _query: &FlightOfferQuery,
//!     ) -> Result<FlightOffersResponse, ClientError> {
//!         Ok(FlightOffersResponse::default())
//!     }
//! }
//! ```

pub mod amadeus;

use async_trait::async_trait;

use crate::{
    errors::ClientError,
    providers::amadeus::{FlightOfferQuery, response::FlightOffersResponse},
};

/// Trait for fetching routes and flight offers from an upstream.
#[async_trait]
pub trait OfferSource: Send + Sync {
    /// IATA codes of airports served non-stop from `origin`.
    async fn direct_destinations(&self, origin: &str) -> Result<Vec<String>, ClientError>;

    /// Priced offers for one route and departure date.
    async fn flight_offers(
        &self,
        query: &FlightOfferQuery,
    ) -> Result<FlightOffersResponse, ClientError>;
}

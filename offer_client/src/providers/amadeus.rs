//! Amadeus self-service flight APIs.

pub mod params;
pub mod provider;
pub mod response;

pub use params::FlightOfferQuery;
pub use provider::{AmadeusSource, DEFAULT_BASE_URL, TOKEN_PATH};

//! Authenticated access to the flight-offers API.
//!
//! - [`client::AuthenticatedClient`]: bearer-token GET with one refresh-and-retry on 401
//!   and a fixed pause before every call.
//! - [`auth::TokenSession`]: the token cache and its refresh policy.
//! - [`providers::OfferSource`]: the upstream seam used by the scrape driver, with the
//!   Amadeus implementation and its wire types under [`providers::amadeus`].

pub mod auth;
pub mod client;
pub mod errors;
pub mod providers;

pub use auth::Credentials;
pub use client::{AuthenticatedClient, ClientSettings};
pub use errors::{ClientError, ClientInitError};

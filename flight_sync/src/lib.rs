//! Flight price scraping into SQLite.
//!
//! - [`normalize`] turns upstream flight offers into storage records.
//! - [`reference`] keeps the airline and aircraft dictionaries current with
//!   change-only upserts.
//! - [`persist`] writes one itinerary with its price and legs per transaction.
//! - [`scrape`] drives the day × airport × destination loop over an
//!   [`offer_client::providers::OfferSource`].

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod normalize;
pub mod persist;
pub mod records;
pub mod reference;
pub mod schema;
pub mod scrape;

pub use error::SyncError;

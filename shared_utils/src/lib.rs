//! Small helpers shared by the `offer_client` and `flight_sync` crates.

pub mod env;

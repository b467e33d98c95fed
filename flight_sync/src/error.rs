//! Error taxonomy for a scrape run.

use offer_client::ClientError;
use thiserror::Error;

use crate::normalize::NormalizeError;

/// The unified error type for the `flight_sync` crate.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The token exchange failed. Fatal for the run.
    #[error("authentication failed: {0}")]
    Auth(#[source] ClientError),

    /// A request failed after the single re-authentication attempt, or never
    /// reached the upstream. Fatal for the run.
    #[error("upstream request failed: {0}")]
    Http(#[source] ClientError),

    /// A response body that could not be decoded. Scoped to that response.
    #[error("malformed response: {0}")]
    MalformedResponse(#[source] ClientError),

    /// An offer with a missing or unparseable required field. Scoped to that offer.
    #[error("malformed offer: {0}")]
    MalformedOffer(#[from] NormalizeError),

    /// A write or upsert failed; the current transaction was rolled back.
    #[error("storage error: {0}")]
    Storage(#[from] diesel::result::Error),
}

impl From<ClientError> for SyncError {
    fn from(err: ClientError) -> Self {
        if err.is_auth() {
            SyncError::Auth(err)
        } else if err.is_malformed() {
            SyncError::MalformedResponse(err)
        } else {
            SyncError::Http(err)
        }
    }
}

impl SyncError {
    /// True for errors scoped to one response or offer rather than the whole run.
    pub fn is_malformed(&self) -> bool {
        matches!(self, SyncError::MalformedResponse(_) | SyncError::MalformedOffer(_))
    }
}

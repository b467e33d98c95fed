//! Error types for the authenticated HTTP client.
//!
//! Two enums, split the same way the client's lifecycle is split:
//! - [`ClientInitError`] for building a client (credentials, TLS/client setup).
//! - [`ClientError`] for everything that can go wrong on a single request,
//!   including the token exchange performed on its behalf.

use reqwest::StatusCode;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

/// Errors that can occur while constructing an [`AuthenticatedClient`](crate::client::AuthenticatedClient).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ClientInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors returned by a single authenticated request.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ClientError {
    /// The token endpoint could not be reached.
    #[snafu(display("Token request to {url} failed: {source}"))]
    AuthTransport {
        url: String,
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The token endpoint answered with a non-2xx status.
    #[snafu(display("Token endpoint {url} returned HTTP {status}: {body}"))]
    AuthRejected {
        url: String,
        status: StatusCode,
        body: String,
        backtrace: Backtrace,
    },

    /// The token endpoint answered 2xx but without a usable token.
    #[snafu(display("Token response from {url} could not be decoded: {source}"))]
    AuthDecode {
        url: String,
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// Network failure, timeout or body read error on an API request.
    #[snafu(display("API request to {url} failed: {source}"))]
    Transport {
        url: String,
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// Non-2xx status after the single re-authentication attempt.
    #[snafu(display("{url} returned HTTP {status}: {body}"))]
    Http {
        url: String,
        status: StatusCode,
        body: String,
        backtrace: Backtrace,
    },

    /// A 2xx body that does not match the expected response shape.
    #[snafu(display("Response from {url} could not be decoded: {source}"))]
    Decode {
        url: String,
        source: serde_json::Error,
        backtrace: Backtrace,
    },
}

impl ClientError {
    /// True for failures of the token exchange itself.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            ClientError::AuthTransport { .. }
                | ClientError::AuthRejected { .. }
                | ClientError::AuthDecode { .. }
        )
    }

    /// True when the upstream answered but the payload did not have the expected shape.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ClientError::Decode { .. })
    }

    /// HTTP status of the failing response, if there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::AuthRejected { status, .. } | ClientError::Http { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

//! Bearer-token session for the client-credentials grant.
//!
//! A [`TokenSession`] owns the cached access token and decides when it must be
//! replaced. It is lazily populated: nothing is requested until the first call
//! to [`TokenSession::token`]. After that a new token is requested only when the
//! upstream rejects the current one (401) or when the advertised lifetime has
//! run out.
//!
//! Refreshes are single-flight. The state sits behind an async mutex that is
//! held across the exchange, and every token carries a generation number so a
//! caller whose rejected token has already been replaced reuses the new one.

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use shared_utils::env::get_env_var;
use snafu::ResultExt;
use tokio::{sync::Mutex, time::Instant};
use tracing::debug;

use crate::{
    client::RequestPacer,
    errors::{
        AuthDecodeSnafu, AuthRejectedSnafu, AuthTransportSnafu, ClientError, ClientInitError,
        MissingEnvVarSnafu,
    },
};

/// Tokens are treated as expired this long before the upstream says so.
const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

/// Client id/secret pair for the client-credentials grant.
pub struct Credentials {
    client_id: SecretString,
    client_secret: SecretString,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: SecretString::new(client_id.into().into()),
            client_secret: SecretString::new(client_secret.into().into()),
        }
    }

    /// Reads `AMADEUS_CLIENT_ID` and `AMADEUS_CLIENT_SECRET` from the environment.
    pub fn from_env() -> Result<Self, ClientInitError> {
        let client_id = get_env_var("AMADEUS_CLIENT_ID").context(MissingEnvVarSnafu)?;
        let client_secret = get_env_var("AMADEUS_CLIENT_SECRET").context(MissingEnvVarSnafu)?;
        Ok(Self::new(client_id, client_secret))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &"[REDACTED]")
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// A bearer token handed out by the session.
#[derive(Clone)]
pub struct AccessToken {
    value: SecretString,
    expires_at: Option<Instant>,
    generation: u64,
}

impl AccessToken {
    pub(crate) fn bearer(&self) -> &str {
        self.value.expose_secret()
    }

    /// Monotonic counter, bumped by every successful exchange.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Default)]
struct TokenState {
    current: Option<AccessToken>,
    issued: u64,
}

/// Owns the current access token and its refresh policy.
pub struct TokenSession {
    credentials: Credentials,
    token_url: String,
    state: Mutex<TokenState>,
}

impl TokenSession {
    pub fn new(credentials: Credentials, token_url: impl Into<String>) -> Self {
        Self {
            credentials,
            token_url: token_url.into(),
            state: Mutex::new(TokenState::default()),
        }
    }

    /// Returns a usable token, exchanging credentials first if there is none
    /// yet or the cached one has expired.
    pub async fn token(
        &self,
        http: &Client,
        pacer: &RequestPacer,
    ) -> Result<AccessToken, ClientError> {
        let mut state = self.state.lock().await;
        if let Some(token) = &state.current {
            if !token.is_expired(Instant::now()) {
                return Ok(token.clone());
            }
            debug!(generation = token.generation, "access token expired");
        }
        self.exchange(&mut state, http, pacer).await
    }

    /// Replaces a token the upstream rejected.
    ///
    /// If another caller already replaced `rejected`, the newer token is
    /// returned without a second exchange.
    pub async fn refresh_rejected(
        &self,
        rejected: &AccessToken,
        http: &Client,
        pacer: &RequestPacer,
    ) -> Result<AccessToken, ClientError> {
        let mut state = self.state.lock().await;
        if let Some(token) = &state.current {
            if token.generation != rejected.generation && !token.is_expired(Instant::now()) {
                return Ok(token.clone());
            }
        }
        self.exchange(&mut state, http, pacer).await
    }

    /// Number of successful exchanges so far.
    pub async fn issued(&self) -> u64 {
        self.state.lock().await.issued
    }

    async fn exchange(
        &self,
        state: &mut TokenState,
        http: &Client,
        pacer: &RequestPacer,
    ) -> Result<AccessToken, ClientError> {
        pacer.wait().await;
        debug!(url = %self.token_url, "requesting access token");

        let url = self.token_url.as_str();
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.expose_secret()),
            ("client_secret", self.credentials.client_secret.expose_secret()),
        ];
        let response = http
            .post(url)
            .form(&form)
            .send()
            .await
            .context(AuthTransportSnafu { url })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown token endpoint error".to_string());
            return AuthRejectedSnafu { url, status, body }.fail();
        }

        let payload: TokenResponse = response.json().await.context(AuthDecodeSnafu { url })?;
        let issued_at = Instant::now();
        state.issued += 1;
        let token = AccessToken {
            value: SecretString::new(payload.access_token.into()),
            expires_at: payload
                .expires_in
                .map(|secs| issued_at + Duration::from_secs(secs).saturating_sub(EXPIRY_MARGIN)),
            generation: state.issued,
        };
        state.current = Some(token.clone());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_at: Option<Instant>) -> AccessToken {
        AccessToken {
            value: SecretString::new("t".into()),
            expires_at,
            generation: 1,
        }
    }

    #[test]
    fn token_without_lifetime_never_expires() {
        assert!(!token(None).is_expired(Instant::now() + Duration::from_secs(86_400)));
    }

    #[test]
    fn token_expires_at_deadline() {
        let now = Instant::now();
        let t = token(Some(now + Duration::from_secs(10)));
        assert!(!t.is_expired(now));
        assert!(t.is_expired(now + Duration::from_secs(10)));
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let creds = Credentials::new("id-123", "very-secret");
        let dbg = format!("{creds:?}");
        assert!(!dbg.contains("very-secret"));
        assert!(!dbg.contains("id-123"));
    }
}

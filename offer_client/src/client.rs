//! HTTP GET with bearer-token authentication and a fixed request pause.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use snafu::ResultExt;
use tracing::{debug, warn};

use crate::{
    auth::{AccessToken, Credentials, TokenSession},
    errors::{ClientBuildSnafu, ClientError, ClientInitError, DecodeSnafu, HttpSnafu, TransportSnafu},
};

/// Upstream rate limits allow roughly two calls per second on the test tier.
pub const DEFAULT_REQUEST_PAUSE: Duration = Duration::from_millis(500);

/// Awaits a fixed pause before every outbound call.
///
/// Calls are assumed to be serialized; the pause is not a shared budget.
#[derive(Debug, Clone, Copy)]
pub struct RequestPacer {
    pause: Duration,
}

impl RequestPacer {
    pub fn new(pause: Duration) -> Self {
        Self { pause }
    }

    pub async fn wait(&self) {
        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }
    }
}

/// Settings for building an [`AuthenticatedClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Client-credentials token endpoint.
    pub token_url: String,
    /// Pause awaited before every outbound call, the token exchange included.
    pub request_pause: Duration,
    /// Per-request timeout handed to reqwest.
    pub timeout: Option<Duration>,
}

/// A reqwest client that keeps a bearer token fresh.
///
/// On a 401 the token is refreshed exactly once and the request retried once.
/// Any other non-2xx status, or a second 401, is returned as [`ClientError::Http`].
pub struct AuthenticatedClient {
    http: Client,
    session: TokenSession,
    pacer: RequestPacer,
}

impl AuthenticatedClient {
    pub fn new(
        credentials: Credentials,
        settings: ClientSettings,
    ) -> Result<Self, ClientInitError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context(ClientBuildSnafu)?;

        Ok(Self {
            http,
            session: TokenSession::new(credentials, settings.token_url),
            pacer: RequestPacer::new(settings.request_pause),
        })
    }

    /// The token session backing this client.
    pub fn session(&self) -> &TokenSession {
        &self.session
    }

    /// GET `url` with `query` and return the JSON body.
    pub async fn get<Q>(&self, url: &str, query: &Q) -> Result<Value, ClientError>
    where
        Q: Serialize + ?Sized + Sync,
    {
        self.get_as(url, query).await
    }

    /// GET `url` with `query` and decode the JSON body into `T`.
    pub async fn get_as<T, Q>(&self, url: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized + Sync,
    {
        let token = self.session.token(&self.http, &self.pacer).await?;
        let mut response = self.send(url, query, &token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(%url, generation = token.generation(), "access token rejected, refreshing once");
            let token = self
                .session
                .refresh_rejected(&token, &self.http, &self.pacer)
                .await?;
            response = self.send(url, query, &token).await?;
        }

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return HttpSnafu { url, status, body }.fail();
        }

        let bytes = response.bytes().await.context(TransportSnafu { url })?;
        serde_json::from_slice(&bytes).context(DecodeSnafu { url })
    }

    async fn send<Q>(&self, url: &str, query: &Q, token: &AccessToken) -> Result<Response, ClientError>
    where
        Q: Serialize + ?Sized + Sync,
    {
        self.pacer.wait().await;
        debug!(%url, "GET");
        self.http
            .get(url)
            .query(query)
            .bearer_auth(token.bearer())
            .send()
            .await
            .context(TransportSnafu { url })
    }
}

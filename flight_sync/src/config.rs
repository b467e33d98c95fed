//! Scrape configuration: parsing, normalization, and loading.
//!
//! A TOML file names the airports to scrape and how far ahead to look:
//!
//! ```toml
//! horizon_days = 7
//! currency = "USD"
//! airports = ["JFK", "lax", " MAD "]
//! on_malformed = "skip"
//!
//! [api]
//! base_url = "https://test.api.amadeus.com"
//! request_pause_ms = 500
//! ```
//!
//! Normalization trims and uppercases airport codes, drops duplicates while
//! preserving order, and rejects anything that is not a three-letter IATA code.
//! Credentials are not part of the file; they come from the environment.

use std::{collections::HashSet, path::Path, time::Duration};

use anyhow::{Context, bail};
use offer_client::providers::amadeus::{DEFAULT_BASE_URL, TOKEN_PATH};
use serde::{Deserialize, Serialize};
use toml::from_str;

/// What to do with an offer that cannot be normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Log, count and continue with the next offer.
    #[default]
    Skip,
    /// Stop the run.
    Abort,
}

/// Top-level scrape configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScrapeConfig {
    /// Departure dates scraped are `today + 1 ..= today + horizon_days`.
    pub horizon_days: u32,
    /// Pricing currency requested from the upstream.
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_adults")]
    pub adults: u32,
    /// Origin airports, IATA codes.
    pub airports: Vec<String>,
    #[serde(default)]
    pub on_malformed: MalformedPolicy,
    #[serde(default)]
    pub api: ApiCfg,
}

/// Upstream endpoints and pacing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiCfg {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Token endpoint; `base_url` + the standard token path when absent.
    pub token_url: Option<String>,
    /// Pause before every outbound call, token refresh included.
    #[serde(default = "default_request_pause_ms")]
    pub request_pause_ms: u64,
}

impl Default for ApiCfg {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_url: None,
            request_pause_ms: default_request_pause_ms(),
        }
    }
}

impl ApiCfg {
    pub fn token_url(&self) -> String {
        self.token_url
            .clone()
            .unwrap_or_else(|| format!("{}{}", self.base_url.trim_end_matches('/'), TOKEN_PATH))
    }

    pub fn request_pause(&self) -> Duration {
        Duration::from_millis(self.request_pause_ms)
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_adults() -> u32 {
    1
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_pause_ms() -> u64 {
    500
}

/// Normalize a configuration in place.
///
/// - Airport codes are trimmed, uppercased and de-duplicated (first occurrence wins)
/// - The currency is trimmed and uppercased
///
/// Returns the number of duplicate airports removed.
///
/// Errors:
/// - An airport that is not three ASCII letters after trimming
/// - An empty airport list, a zero horizon, zero adults or an empty currency
pub fn normalize_config(cfg: &mut ScrapeConfig) -> anyhow::Result<usize> {
    if cfg.horizon_days == 0 {
        bail!("horizon_days must be at least 1");
    }
    if cfg.adults == 0 {
        bail!("adults must be at least 1");
    }

    cfg.currency = cfg.currency.trim().to_uppercase();
    if cfg.currency.is_empty() {
        bail!("currency cannot be empty");
    }

    let before = cfg.airports.len();
    let mut seen = HashSet::new();
    let mut airports = Vec::with_capacity(before);
    for raw in std::mem::take(&mut cfg.airports) {
        let code = raw.trim().to_uppercase();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            bail!("not an IATA airport code: {raw:?}");
        }
        if seen.insert(code.clone()) {
            airports.push(code);
        }
    }
    if airports.is_empty() {
        bail!("airports cannot be empty");
    }

    cfg.airports = airports;
    Ok(before - cfg.airports.len())
}

/// Parse and normalize a configuration from a TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<ScrapeConfig> {
    let mut cfg: ScrapeConfig = from_str(toml_str).context("failed to parse scrape config TOML")?;
    normalize_config(&mut cfg).context("invalid scrape config")?;
    Ok(cfg)
}

/// Read a configuration file from disk, parse, and normalize it.
pub fn load_config_path(path: impl AsRef<Path>) -> anyhow::Result<ScrapeConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}

//! The scrape loop.
//!
//! For every departure date in the horizon and every configured origin airport,
//! ask the upstream for the airport's direct destinations, then search offers
//! for each destination. Each response's dictionaries are reconciled first, then
//! every offer is decoded and normalized on its own and every resulting
//! itinerary written in its own transaction. Everything runs strictly in sequence; pacing is left to the
//! client.
//!
//! Authentication, HTTP and storage failures end the run. A response or offer
//! that cannot be decoded or normalized follows the configured
//! [`MalformedPolicy`].

use chrono::{Days, NaiveDate, Utc};
use diesel::SqliteConnection;
use offer_client::providers::{OfferSource, amadeus::FlightOfferQuery};
use tracing::{debug, info, warn};

use crate::config::{MalformedPolicy, ScrapeConfig};
use crate::error::SyncError;
use crate::normalize::{NormalizeError, normalize_offer};
use crate::persist::write_itinerary;
use crate::reference::{ReferenceDictionary, sync_dictionaries};

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    /// Upstream calls issued, excluding token exchanges.
    pub requests: usize,
    /// Offers seen across all search responses.
    pub offers: usize,
    pub itineraries_written: usize,
    /// Offers dropped under [`MalformedPolicy::Skip`].
    pub offers_skipped: usize,
    /// Responses that failed to decode and were dropped under [`MalformedPolicy::Skip`].
    pub responses_skipped: usize,
    /// Airline and aircraft rows upserted.
    pub reference_rows: usize,
}

/// Drives one scrape over an [`OfferSource`].
pub struct Scraper<S> {
    source: S,
    dictionary: ReferenceDictionary,
    config: ScrapeConfig,
}

impl<S: OfferSource> Scraper<S> {
    /// `dictionary` should mirror storage, usually [`ReferenceDictionary::load_all`].
    pub fn new(source: S, dictionary: ReferenceDictionary, config: ScrapeConfig) -> Self {
        Self {
            source,
            dictionary,
            config,
        }
    }

    pub fn dictionary(&self) -> &ReferenceDictionary {
        &self.dictionary
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Scrapes departure dates `today + 1 ..= today + horizon_days`.
    pub async fn run(&mut self, conn: &mut SqliteConnection, today: NaiveDate) -> Result<ScrapeReport, SyncError> {
        let mut report = ScrapeReport::default();
        let policy = self.config.on_malformed;

        for day in 1..=self.config.horizon_days {
            let Some(departure_date) = today.checked_add_days(Days::new(u64::from(day))) else {
                warn!(day, "departure date out of range, stopping");
                break;
            };
            info!(%departure_date, "saving flights and prices for departure date");

            for origin in &self.config.airports {
                report.requests += 1;
                let destinations = match self.source.direct_destinations(origin).await {
                    Ok(d) => d,
                    Err(e) => {
                        tolerate(SyncError::from(e), policy, &mut report.responses_skipped)?;
                        continue;
                    }
                };
                debug!(%origin, count = destinations.len(), "direct destinations");

                for destination in &destinations {
                    let recorded_at = Utc::now();
                    let query = FlightOfferQuery::one_way(origin, destination, departure_date, &self.config.currency)
                        .with_adults(self.config.adults);

                    report.requests += 1;
                    let response = match self.source.flight_offers(&query).await {
                        Ok(r) => r,
                        Err(e) => {
                            tolerate(SyncError::from(e), policy, &mut report.responses_skipped)?;
                            continue;
                        }
                    };

                    if let Some(dictionaries) = &response.dictionaries {
                        report.reference_rows += sync_dictionaries(conn, &mut self.dictionary, dictionaries)?;
                    }

                    for offer in response.offers() {
                        report.offers += 1;
                        let normalized = offer
                            .map_err(NormalizeError::from)
                            .and_then(|offer| normalize_offer(&offer, origin, recorded_at));
                        let records = match normalized {
                            Ok(records) => records,
                            Err(e) => {
                                tolerate(SyncError::from(e), policy, &mut report.offers_skipped)?;
                                continue;
                            }
                        };
                        for record in &records {
                            write_itinerary(conn, record)?;
                            report.itineraries_written += 1;
                        }
                    }
                }
            }

            info!(
                %departure_date,
                requests = report.requests,
                itineraries = report.itineraries_written,
                "departure date done"
            );
        }

        info!(?report, "scrape finished");
        Ok(report)
    }
}

/// Counts and swallows a malformed-input error under [`MalformedPolicy::Skip`];
/// returns every other error.
fn tolerate(err: SyncError, policy: MalformedPolicy, skipped: &mut usize) -> Result<(), SyncError> {
    match (err.is_malformed(), policy) {
        (true, MalformedPolicy::Skip) => {
            warn!(error = %err, "skipping malformed input");
            *skipped += 1;
            Ok(())
        }
        _ => Err(err),
    }
}

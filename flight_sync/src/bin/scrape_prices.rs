use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use flight_sync::{
    config::load_config_path,
    db::{connection, migrate},
    reference::ReferenceDictionary,
    scrape::Scraper,
};
use offer_client::{
    AuthenticatedClient, ClientSettings, Credentials, providers::amadeus::AmadeusSource,
};
use shared_utils::env::get_env_var_or;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATABASE_URL: &str = "flight_prices.db";

#[derive(Parser)]
#[command(version, about = "Record flight offer prices")]
struct Cli {
    /// SQLite database; falls back to DATABASE_URL.
    #[arg(long, global = true, value_name = "URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Apply pending schema migrations.
    Migrate,
    /// Scrape prices for the configured airports.
    Run {
        #[arg(long, value_name = "FILE")]
        config: String,
        /// Days ahead to scrape, overriding `horizon_days`.
        #[arg(short = 'z', long)]
        horizon: Option<u32>,
        /// Per-request timeout in seconds.
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let db_url = cli
        .database_url
        .unwrap_or_else(|| get_env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL));

    match cli.cmd {
        Cmd::Migrate => {
            let applied = migrate::run_sqlite(&db_url)?;
            info!(applied, database = %db_url, "migrations done");
        }
        Cmd::Run {
            config,
            horizon,
            timeout_secs,
        } => {
            // 1) Config + credentials
            let mut cfg = load_config_path(&config)?;
            if let Some(days) = horizon {
                anyhow::ensure!(days > 0, "--horizon must be at least 1");
                cfg.horizon_days = days;
            }
            let credentials = Credentials::from_env()?;

            // 2) DB, then the dictionaries already stored
            let mut conn = connection::open_migrated(&db_url)?;
            let dictionary = ReferenceDictionary::load_all(&mut conn).context("load reference tables")?;

            // 3) Upstream client
            let client = AuthenticatedClient::new(
                credentials,
                ClientSettings {
                    token_url: cfg.api.token_url(),
                    request_pause: cfg.api.request_pause(),
                    timeout: Some(Duration::from_secs(timeout_secs)),
                },
            )?;
            let source = AmadeusSource::new(client, cfg.api.base_url.clone());

            // 4) Scrape
            info!(
                airports = cfg.airports.len(),
                horizon_days = cfg.horizon_days,
                database = %db_url,
                "starting scrape"
            );
            let mut scraper = Scraper::new(source, dictionary, cfg);
            let report = scraper.run(&mut conn, Local::now().date_naive()).await?;
            info!(
                requests = report.requests,
                offers = report.offers,
                itineraries = report.itineraries_written,
                offers_skipped = report.offers_skipped,
                responses_skipped = report.responses_skipped,
                "done"
            );
        }
    }

    Ok(())
}

//! Adapters for the supported rate feeds.
//!
//! Each provider fetches one JSON document and normalizes it into a
//! [`RateSnapshot`]. Refreshes are always user-triggered; there is no
//! retry, caching, or background polling.

pub mod aggregator;
pub mod cbr;
pub mod coingecko;

use crate::core::config::AppConfig;
use crate::core::names::NameCatalog;
use crate::core::rates::{RateSnapshot, SourceId};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failure classes surfaced on the status line. A failed refresh leaves
/// the previous snapshot untouched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The connection could not be established.
    #[error("No internet connection")]
    Network(#[source] reqwest::Error),
    /// The endpoint did not answer within the configured timeout.
    #[error("Connection timed out")]
    Timeout(#[source] reqwest::Error),
    /// The response decoded but did not match the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
    /// Anything else that failed during fetch or parse.
    #[error("Failed to load rates: {0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err)
        } else if err.is_connect() {
            FetchError::Network(err)
        } else {
            FetchError::Other(err.to_string())
        }
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// The feed this provider adapts.
    fn id(&self) -> SourceId;

    /// Fetches the raw feed and normalizes it into a fresh snapshot.
    async fn fetch_rates(&self) -> Result<RateSnapshot, FetchError>;
}

/// Builds the provider for a source from the configured endpoints.
pub fn make_provider(
    id: SourceId,
    config: &AppConfig,
    catalog: Arc<NameCatalog>,
) -> Box<dyn RateProvider> {
    let timeout = Duration::from_secs(config.timeout_secs);
    match id {
        SourceId::Cbr => {
            let base_url = config
                .sources
                .cbr
                .as_ref()
                .map_or("https://www.cbr-xml-daily.ru", |s| &s.base_url);
            Box::new(cbr::CbrProvider::new(base_url, timeout, catalog))
        }
        SourceId::ExchangeRateApi => {
            let base_url = config
                .sources
                .exchangerate_api
                .as_ref()
                .map_or("https://api.exchangerate-api.com", |s| &s.base_url);
            Box::new(aggregator::AggregatorProvider::exchange_rate_api(
                base_url, timeout, catalog,
            ))
        }
        SourceId::Frankfurter => {
            let base_url = config
                .sources
                .frankfurter
                .as_ref()
                .map_or("https://api.frankfurter.app", |s| &s.base_url);
            Box::new(aggregator::AggregatorProvider::frankfurter(
                base_url, timeout, catalog,
            ))
        }
        SourceId::CoinGecko => {
            let base_url = config
                .sources
                .coingecko
                .as_ref()
                .map_or("https://api.coingecko.com", |s| &s.base_url);
            Box::new(coingecko::CoinGeckoProvider::new(base_url, timeout, catalog))
        }
    }
}

/// Performs a single GET with the configured timeout and returns the body.
pub(crate) async fn fetch_body(url: &str, timeout: Duration) -> Result<String, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent("valuta/0.1")
        .timeout(timeout)
        .build()
        .map_err(|e| FetchError::Other(e.to_string()))?;

    debug!("Requesting rates from {}", url);
    let response = client.get(url).send().await?;
    let body = response.text().await?;
    Ok(body)
}

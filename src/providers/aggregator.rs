//! Flat-form aggregator feeds.
//!
//! Two public aggregators share the same `{rates: {code: decimal}}` shape
//! and differ only in endpoint and base currency, so one adapter covers
//! both. Rates are quoted out of the base: one base unit buys `rate`
//! units of the code.

use super::{FetchError, RateProvider};
use crate::core::names::NameCatalog;
use crate::core::rates::{QuoteDirection, RateEntry, RateSnapshot, SourceId};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
struct AggregatorResponse {
    rates: HashMap<String, Decimal>,
}

pub struct AggregatorProvider {
    id: SourceId,
    url: String,
    base: &'static str,
    timeout: Duration,
    catalog: Arc<NameCatalog>,
}

impl AggregatorProvider {
    pub fn exchange_rate_api(base_url: &str, timeout: Duration, catalog: Arc<NameCatalog>) -> Self {
        AggregatorProvider {
            id: SourceId::ExchangeRateApi,
            url: format!("{base_url}/v4/latest/USD"),
            base: "USD",
            timeout,
            catalog,
        }
    }

    pub fn frankfurter(base_url: &str, timeout: Duration, catalog: Arc<NameCatalog>) -> Self {
        AggregatorProvider {
            id: SourceId::Frankfurter,
            url: format!("{base_url}/latest"),
            base: "EUR",
            timeout,
            catalog,
        }
    }

    /// Normalizes an aggregator response into a snapshot based on `base`.
    pub fn normalize(
        id: SourceId,
        base: &str,
        body: &str,
        catalog: &NameCatalog,
    ) -> Result<RateSnapshot, FetchError> {
        let response: AggregatorResponse =
            serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let mut rates: BTreeMap<String, RateEntry> = response
            .rates
            .into_iter()
            .map(|(code, rate)| (code, RateEntry::Flat(rate)))
            .collect();

        // The base is pegged to exactly 1, whatever the feed says.
        rates.insert(base.to_string(), RateEntry::Flat(Decimal::ONE));

        let names = rates
            .keys()
            .map(|code| (code.clone(), catalog.resolve(code)))
            .collect();

        Ok(RateSnapshot::new(
            id,
            base,
            QuoteDirection::BaseToForeign,
            rates,
            names,
        ))
    }
}

#[async_trait]
impl RateProvider for AggregatorProvider {
    fn id(&self) -> SourceId {
        self.id
    }

    async fn fetch_rates(&self) -> Result<RateSnapshot, FetchError> {
        let body = super::fetch_body(&self.url, self.timeout).await?;

        match Self::normalize(self.id, self.base, &body, &self.catalog) {
            Ok(snapshot) => {
                debug!("Normalized {} currencies from {}", snapshot.len(), self.id);
                Ok(snapshot)
            }
            Err(e) => {
                error!(error = %e, response = %body, "Failed to normalize rate feed");
                Err(e)
            }
        }
    }
}

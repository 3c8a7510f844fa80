//! Central-bank daily feed adapter.
//!
//! The feed quotes every currency against the ruble in value/nominal lot
//! form and carries a display name per entry.

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

const BASE: &str = "RUB";

#[derive(Debug, Deserialize)]
struct CbrResponse {
    #[serde(rename = "Valute")]
    valute: HashMap<String, CbrQuote>,
}

#[derive(Debug, Deserialize)]
struct CbrQuote {
    #[serde(rename = "Value")]
    value: Decimal,
    #[serde(rename = "Nominal")]
    nominal: Decimal,
    #[serde(rename = "Name")]
    name: Option<String>,
}

pub struct CbrProvider {
    base_url: String,
    timeout: Duration,
    catalog: Arc<NameCatalog>,
}

impl CbrProvider {
    pub fn new(base_url: &str, timeout: Duration, catalog: Arc<NameCatalog>) -> Self {
        CbrProvider {
            base_url: base_url.to_string(),
            timeout,
            catalog,
        }
    }

    /// Normalizes the raw daily feed into a ruble-based snapshot.
    pub fn normalize(body: &str, catalog: &NameCatalog) -> Result<RateSnapshot, FetchError> {
        let response: CbrResponse =
            serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let mut rates = BTreeMap::new();
        let mut names = BTreeMap::new();
        for (code, quote) in response.valute {
            names.insert(code.clone(), quote.name.unwrap_or_else(|| code.clone()));
            rates.insert(
                code,
                RateEntry::Ratio {
                    value: quote.value,
                    nominal: quote.nominal,
                },
            );
        }

        // The feed quotes against the ruble but carries no entry for it.
        rates.insert(BASE.to_string(), RateEntry::identity());
        names.insert(BASE.to_string(), catalog.resolve(BASE));

        Ok(RateSnapshot::new(
            SourceId::Cbr,
            BASE,
            QuoteDirection::ForeignToBase,
            rates,
            names,
        ))
    }
}

#[async_trait]
impl RateProvider for CbrProvider {
    fn id(&self) -> SourceId {
        SourceId::Cbr
    }

    async fn fetch_rates(&self) -> Result<RateSnapshot, FetchError> {
        let url = format!("{}/daily_json.js", self.base_url);
        let body = super::fetch_body(&url, self.timeout).await?;

        match Self::normalize(&body, &self.catalog) {
            Ok(snapshot) => {
                debug!("Normalized {} currencies from {}", snapshot.len(), self.id());
                Ok(snapshot)
            }
            Err(e) => {
                error!(error = %e, response = %body, "Failed to normalize rate feed");
                Err(e)
            }
        }
    }
}

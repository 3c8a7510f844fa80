//! Crypto price feed adapter.
//!
//! The feed returns only the assets asked for, each with a USD quote.
//! Assets missing from the payload are omitted without error. Three fixed
//! fiat cross-rates are always appended so crypto amounts can be expressed
//! in USD, EUR or RUB; these are hardcoded approximations, not fetched.

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

const BASE: &str = "USD";

/// Asset identifiers requested from the feed, with their currency codes.
const ASSETS: &[(&str, &str)] = &[("bitcoin", "BTC"), ("ethereum", "ETH")];

#[derive(Debug, Deserialize)]
struct AssetQuote {
    usd: Decimal,
}

fn synthetic_crosses() -> [(&'static str, Decimal); 3] {
    [
        ("USD", Decimal::ONE),
        ("EUR", Decimal::new(92, 2)),
        ("RUB", Decimal::new(90, 0)),
    ]
}

pub struct CoinGeckoProvider {
    base_url: String,
    timeout: Duration,
    catalog: Arc<NameCatalog>,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str, timeout: Duration, catalog: Arc<NameCatalog>) -> Self {
        CoinGeckoProvider {
            base_url: base_url.to_string(),
            timeout,
            catalog,
        }
    }

    /// Normalizes the simple-price response into a USD-based snapshot.
    pub fn normalize(body: &str, catalog: &NameCatalog) -> Result<RateSnapshot, FetchError> {
        let response: HashMap<String, AssetQuote> =
            serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let mut rates = BTreeMap::new();
        let mut names = BTreeMap::new();
        for (asset, code) in ASSETS {
            if let Some(quote) = response.get(*asset) {
                rates.insert((*code).to_string(), RateEntry::Flat(quote.usd));
                names.insert((*code).to_string(), catalog.resolve(code));
            }
        }

        for (code, rate) in synthetic_crosses() {
            rates.insert(code.to_string(), RateEntry::Flat(rate));
            names.insert(code.to_string(), catalog.resolve(code));
        }

        Ok(RateSnapshot::new(
            SourceId::CoinGecko,
            BASE,
            QuoteDirection::BaseToForeign,
            rates,
            names,
        ))
    }
}

#[async_trait]
impl RateProvider for CoinGeckoProvider {
    fn id(&self) -> SourceId {
        SourceId::CoinGecko
    }

    async fn fetch_rates(&self) -> Result<RateSnapshot, FetchError> {
        let ids: Vec<&str> = ASSETS.iter().map(|(asset, _)| *asset).collect();
        let url = format!(
            "{}/api/v3/simple/price?ids={}&vs_currencies=usd",
            self.base_url,
            ids.join(",")
        );
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

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_normalize_maps_assets_and_appends_crosses() {
        let body = r#"{"bitcoin": {"usd": 67000.0}, "ethereum": {"usd": 3500.0}}"#;
        let catalog = NameCatalog::builtin();
        let snapshot = CoinGeckoProvider::normalize(body, &catalog).unwrap();

        assert_eq!(snapshot.base(), "USD");
        assert_eq!(snapshot.direction(), QuoteDirection::BaseToForeign);
        assert_eq!(snapshot.rate("BTC"), Some(dec!(67000)));
        assert_eq!(snapshot.rate("ETH"), Some(dec!(3500)));
        assert_eq!(snapshot.rate("USD"), Some(Decimal::ONE));
        assert_eq!(snapshot.rate("EUR"), Some(dec!(0.92)));
        assert_eq!(snapshot.rate("RUB"), Some(dec!(90)));
        assert_eq!(snapshot.name("BTC"), "Bitcoin");
    }

    #[test]
    fn test_missing_asset_is_omitted_not_fabricated() {
        let body = r#"{"bitcoin": {"usd": 67000.0}}"#;
        let catalog = NameCatalog::builtin();
        let snapshot = CoinGeckoProvider::normalize(body, &catalog).unwrap();

        assert!(!snapshot.contains("ETH"));
        assert!(snapshot.contains("BTC"));
        // The fiat crosses are present regardless of payload contents.
        assert!(snapshot.contains("USD"));
        assert!(snapshot.contains("EUR"));
        assert!(snapshot.contains("RUB"));
    }

    #[test]
    fn test_empty_payload_still_yields_the_crosses() {
        let catalog = NameCatalog::builtin();
        let snapshot = CoinGeckoProvider::normalize("{}", &catalog).unwrap();
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_non_object_payload_is_malformed() {
        let catalog = NameCatalog::builtin();
        let result = CoinGeckoProvider::normalize("[1, 2]", &catalog);
        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_fetch_rates_requests_both_assets() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .and(query_param("ids", "bitcoin,ethereum"))
            .and(query_param("vs_currencies", "usd"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"bitcoin": {"usd": 67000.0}}"#),
            )
            .mount(&mock_server)
            .await;

        let catalog = Arc::new(NameCatalog::builtin());
        let provider = CoinGeckoProvider::new(&mock_server.uri(), Duration::from_secs(2), catalog);

        let snapshot = provider.fetch_rates().await.unwrap();
        assert_eq!(snapshot.source(), SourceId::CoinGecko);
        assert!(snapshot.contains("BTC"));
        assert!(!snapshot.contains("ETH"));
    }
}

use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_cbr_mock_server(mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/daily_json.js"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub async fn create_coingecko_mock_server(mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(mock_uri: &str, source_key: &str, default_source: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
sources:
  {source_key}:
    base_url: "{mock_uri}"
default_source: "{default_source}"
timeout_secs: 2
"#
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

const CBR_MOCK_JSON: &str = r#"{
    "Date": "2025-08-07T11:30:00+03:00",
    "Valute": {
        "USD": {"Value": 90.0, "Nominal": 1, "Name": "Доллар США"},
        "EUR": {"Value": 100.0, "Nominal": 1, "Name": "Евро"},
        "JPY": {"Value": 62.5, "Nominal": 10, "Name": "Иен"}
    }
}"#;

#[test_log::test(tokio::test)]
async fn test_full_convert_flow_with_cbr_mock() {
    let mock_server = test_utils::create_cbr_mock_server(CBR_MOCK_JSON).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "cbr", "cbr");

    let result = valuta::run_command(
        valuta::AppCommand::Convert {
            amount: "100".to_string(),
            from: "usd".to_string(),
            to: "rub".to_string(),
            source: None,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(
        result.is_ok(),
        "Convert command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_rates_command_with_cbr_mock() {
    let mock_server = test_utils::create_cbr_mock_server(CBR_MOCK_JSON).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "cbr", "cbr");

    let result = valuta::run_command(
        valuta::AppCommand::Rates { source: None },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_ok(), "Rates command failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_convert_reports_unknown_currency() {
    let mock_server = test_utils::create_cbr_mock_server(CBR_MOCK_JSON).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "cbr", "cbr");

    let result = valuta::run_command(
        valuta::AppCommand::Convert {
            amount: "100".to_string(),
            from: "usd".to_string(),
            to: "xyz".to_string(),
            source: None,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "No rate data for XYZ");
}

#[test_log::test(tokio::test)]
async fn test_convert_fails_cleanly_when_feed_is_down() {
    // Nothing listens on this port; classified as a network failure.
    let config_file = test_utils::write_config("http://127.0.0.1:9", "cbr", "cbr");

    let result = valuta::run_command(
        valuta::AppCommand::Convert {
            amount: "100".to_string(),
            from: "usd".to_string(),
            to: "rub".to_string(),
            source: None,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "No internet connection");
}

#[test_log::test(tokio::test)]
async fn test_coingecko_snapshot_end_to_end() {
    use valuta::core::convert;
    use valuta::core::names::NameCatalog;
    use valuta::providers::RateProvider;
    use valuta::providers::coingecko::CoinGeckoProvider;

    let mock_response = r#"{"bitcoin": {"usd": 67000.0}}"#;
    let mock_server = test_utils::create_coingecko_mock_server(mock_response).await;

    let catalog = Arc::new(NameCatalog::builtin());
    let provider = CoinGeckoProvider::new(&mock_server.uri(), Duration::from_secs(2), catalog);

    let snapshot = provider.fetch_rates().await.unwrap();
    info!(currencies = snapshot.len(), "Fetched crypto snapshot");

    // Only the asset present in the payload, plus the fixed fiat crosses.
    assert!(snapshot.contains("BTC"));
    assert!(!snapshot.contains("ETH"));

    // 10 USD = 9.2 EUR through the synthetic crosses.
    let conversion = convert("10", "USD", "EUR", &snapshot).unwrap();
    assert_eq!(conversion.display_line(), "10,00 USD = 9,2000 EUR");
}

#[test_log::test(tokio::test)]
async fn test_names_file_overrides_flow() {
    use valuta::core::names::NameCatalog;

    let names_file = tempfile::NamedTempFile::new().unwrap();
    fs::write(names_file.path(), r#"{"USD": "Greenback"}"#).unwrap();

    let mut catalog = NameCatalog::builtin();
    catalog.load_overrides(names_file.path()).unwrap();
    assert_eq!(catalog.resolve("USD"), "Greenback");
}

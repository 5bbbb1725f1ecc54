mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use congressintel::application::backtest::DataGap;
use congressintel::domain::ports::progress::NoopProgress;
use congressintel::infrastructure::config::AppConfig;
use congressintel::infrastructure::prices::YahooPrices;
use congressintel::{CongressIntel, Providers};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn yahoo_with_stale_symbol() -> MockServer {
    let server = MockServer::start().await;
    // 2024-01-10, 2024-01-11, 2024-01-12 at 14:30 UTC
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/NVDA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "chart": {
                "result": [{
                    "meta": {"symbol": "NVDA"},
                    "timestamp": [1704897000, 1704983400, 1705069800],
                    "indicators": {"quote": [{"close": [100.0, 105.0, 110.0]}]}
                }],
                "error": null
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/OLDCO"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "chart": {
                "result": null,
                "error": {
                    "code": "Bad Request",
                    "description": "Data doesn't exist for startDate = 1704844800, endDate = 1736812800"
                }
            }
        })))
        .mount(&server)
        .await;
    server
}

fn intel(server: &MockServer) -> CongressIntel {
    let feed = FakeFeed::new(
        vec![
            row("Jane Doe", "NVDA", "Purchase", "$50,001 - $100,000", "2024-01-10"),
            row("Old Timer", "OLDCO", "Purchase", "$1,001 - $15,000", "2024-01-10"),
        ],
        vec![],
    );
    let prices = Arc::new(YahooPrices::new(Duration::from_secs(5)).with_base_url(server.uri()));
    CongressIntel::with_providers(
        Providers {
            feed: Arc::new(feed),
            prices: prices.clone(),
            live: prices,
            notifier: None,
        },
        &AppConfig::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_symbol_without_data_is_skipped_not_fatal() {
    let server = yahoo_with_stale_symbol().await;
    let ci = intel(&server);

    let snapshot = ci.snapshot(&NoopProgress).await.unwrap();
    assert_eq!(snapshot.summary.purchases_attempted, 2);
    assert_eq!(snapshot.summary.backtested, 1);
    assert_eq!(snapshot.summary.data_gaps, 1);
    assert_eq!(snapshot.backtested[0].trade.ticker, "NVDA");
    assert_eq!(snapshot.backtested[0].backtest.return_at(1), Some(5.0));
    assert_eq!(snapshot.skipped[0].ticker, "OLDCO");
    assert_eq!(snapshot.skipped[0].gap, DataGap::UnknownTicker);
}

#[tokio::test]
async fn test_server_error_still_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let ci = intel(&server);

    let err = ci.snapshot(&NoopProgress).await.unwrap_err();
    assert!(matches!(
        err,
        congressintel::domain::error::DomainError::UpstreamUnavailable { status: Some(502), .. }
    ));
}

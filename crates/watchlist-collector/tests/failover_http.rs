//! 실제 HTTP 백엔드를 통한 엔드포인트 failover 테스트.

use std::sync::Arc;
use std::time::Duration;
use watchlist_collector::modules::{persist, Aggregator, FetchOptions, FsArtifactWriter, OutputLayout};
use watchlist_collector::SourceConfig;
use watchlist_core::{AttemptOutcome, SourceId};
use watchlist_exchange::{RestCatalog, RestConfig};

const EMPTY_LISTING: &str = r#"{"symbols": []}"#;

const THREE_PAIRS: &str = r#"{"symbols": [
    {"symbol": "ETHBTC", "status": "TRADING", "baseAsset": "ETH", "quoteAsset": "BTC", "isSpotTradingAllowed": true},
    {"symbol": "LTCBTC", "status": "TRADING", "baseAsset": "LTC", "quoteAsset": "BTC", "isSpotTradingAllowed": true},
    {"symbol": "ADABTC", "status": "TRADING", "baseAsset": "ADA", "quoteAsset": "BTC", "isSpotTradingAllowed": true},
    {"symbol": "ETHUSDT", "status": "TRADING", "baseAsset": "ETH", "quoteAsset": "USDT", "isSpotTradingAllowed": true}
]}"#;

#[tokio::test]
async fn test_failover_walks_endpoints_until_non_empty() {
    let mut blocked = mockito::Server::new_async().await;
    let mut empty = mockito::Server::new_async().await;
    let mut healthy = mockito::Server::new_async().await;
    let mut unused = mockito::Server::new_async().await;

    let blocked_mock = blocked
        .mock("GET", "/api/v3/exchangeInfo")
        .with_status(451)
        .with_body("restricted location")
        .create_async()
        .await;
    let empty_mock = empty
        .mock("GET", "/api/v3/exchangeInfo")
        .with_status(200)
        .with_body(EMPTY_LISTING)
        .create_async()
        .await;
    let healthy_mock = healthy
        .mock("GET", "/api/v3/exchangeInfo")
        .with_status(200)
        .with_body(THREE_PAIRS)
        .create_async()
        .await;
    let unused_mock = unused
        .mock("GET", "/api/v3/exchangeInfo")
        .expect(0)
        .create_async()
        .await;

    let endpoints = vec![blocked.url(), empty.url(), healthy.url(), unused.url()];
    let dir = tempfile::tempdir().unwrap();
    let catalog = RestCatalog::new(RestConfig::default().with_timeout_secs(5)).unwrap();
    let aggregator = Aggregator::new(
        Arc::new(catalog),
        FetchOptions::new("BTC", Duration::from_secs(5)),
        OutputLayout::new(dir.path().join("lists"), dir.path().join("META.json"), "BTC"),
    );

    let sources = vec![SourceConfig::failover(
        SourceId::new("binance").unwrap(),
        endpoints.clone(),
    )];
    let report = aggregator.run(&sources).await;
    persist(&report, aggregator.layout(), &FsArtifactWriter).unwrap();

    blocked_mock.assert_async().await;
    empty_mock.assert_async().await;
    healthy_mock.assert_async().await;
    unused_mock.assert_async().await;

    let binance = report.result("binance").unwrap();
    let symbols: Vec<&str> = binance.symbols().iter().map(|s| s.as_str()).collect();
    assert_eq!(symbols, vec!["BINANCE:ADABTC", "BINANCE:ETHBTC", "BINANCE:LTCBTC"]);
    assert_eq!(binance.selected_endpoint(), Some(healthy.url().as_str()));

    let outcomes: Vec<&AttemptOutcome> = binance.attempts().iter().map(|a| &a.outcome).collect();
    assert_eq!(outcomes.len(), 3);
    assert!(matches!(outcomes[0], AttemptOutcome::Error { .. }));
    assert_eq!(*outcomes[1], AttemptOutcome::Empty);
    assert_eq!(*outcomes[2], AttemptOutcome::Success { count: 3 });

    let meta: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("META.json")).unwrap())
            .unwrap();
    assert_eq!(meta["failover"]["source"], "BINANCE");
    assert_eq!(meta["failover"]["endpoints"], serde_json::json!(endpoints));
    assert_eq!(meta["failover"]["selectedEndpoint"], healthy.url());
    assert_eq!(meta["failover"]["attempts"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_failover_exhaustion_leaves_source_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v3/exchangeInfo")
        .with_status(200)
        .with_body(EMPTY_LISTING)
        .expect(1)
        .create_async()
        .await;

    let catalog = RestCatalog::new(RestConfig::default().with_timeout_secs(5)).unwrap();
    let aggregator = Aggregator::new(
        Arc::new(catalog),
        FetchOptions::new("BTC", Duration::from_secs(5)),
        OutputLayout::new("lists", "META.json", "BTC"),
    );

    let sources = vec![SourceConfig::failover(
        SourceId::new("binance").unwrap(),
        vec![server.url(), "http://127.0.0.1:1".to_string()],
    )];
    let report = aggregator.run(&sources).await;

    let binance = report.result("binance").unwrap();
    assert!(binance.is_empty());
    assert_eq!(binance.diagnostics().len(), 2);
    assert!(binance.selected_endpoint().is_none());
    assert!(!report.has_combined());
    assert!(report.metadata.failover().unwrap().selected_endpoint.is_none());
}

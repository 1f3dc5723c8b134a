//! Unit tests for the concurrent batch orchestrator

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use sigvana::config::BatchConfig;
use sigvana::engine::{Analyzer, BatchOrchestrator};
use sigvana::error::EngineError;
use sigvana::models::candle::Candle;
use sigvana::services::market_data::{InMemoryMarketData, MarketDataProvider};
use tokio::sync::watch;

fn flat_candles(symbol: &str, count: usize) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            Candle::new(
                symbol,
                start + Duration::minutes(i as i64),
                100.0,
                100.5,
                99.5,
                100.0,
                1_000,
            )
        })
        .collect()
}

async fn provider_with(symbols: &[&str]) -> Arc<InMemoryMarketData> {
    let provider = Arc::new(InMemoryMarketData::new());
    for symbol in symbols {
        provider
            .load_series(symbol.to_string(), flat_candles(symbol, 60))
            .await
            .unwrap();
    }
    provider
}

fn orchestrator(provider: Arc<InMemoryMarketData>) -> BatchOrchestrator {
    let dyn_provider: Arc<dyn MarketDataProvider> = provider;
    BatchOrchestrator::new(
        Arc::new(Analyzer::default()),
        dyn_provider,
        &BatchConfig::default(),
    )
}

fn symbols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn every_requested_symbol_gets_exactly_one_entry() {
    let provider = provider_with(&["RELIANCE", "TCS", "INFY"]).await;
    let requested = symbols(&["RELIANCE", "TCS", "INFY", "UNKNOWN1", "UNKNOWN2"]);

    let results = orchestrator(provider).run(&requested).await;

    assert_eq!(results.len(), 5);
    let failures = results.values().filter(|r| r.is_err()).count();
    assert_eq!(failures, 2);
    assert!(results["RELIANCE"].is_ok());
    assert!(results["UNKNOWN1"].is_err());
}

#[tokio::test]
async fn one_failure_never_poisons_siblings() {
    let provider = provider_with(&["RELIANCE"]).await;
    // A loaded but too-short series fails analysis without touching others.
    provider
        .load_series("TCS".to_string(), flat_candles("TCS", 1))
        .await
        .unwrap();

    let results = orchestrator(provider)
        .run(&symbols(&["RELIANCE", "TCS"]))
        .await;

    assert!(results["RELIANCE"].is_ok());
    let failure = results["TCS"].as_ref().unwrap_err();
    assert_eq!(failure.symbol, "TCS");
    assert!(matches!(
        failure.source,
        EngineError::InsufficientData { .. }
    ));
}

#[tokio::test]
async fn unknown_symbols_report_the_provider_error() {
    let provider = provider_with(&[]).await;
    let results = orchestrator(provider).run(&symbols(&["GHOST"])).await;
    let failure = results["GHOST"].as_ref().unwrap_err();
    assert!(matches!(failure.source, EngineError::InvalidInput(_)));
    assert!(failure.source.to_string().contains("not found"));
}

#[tokio::test]
async fn concurrency_of_one_still_completes_the_whole_batch() {
    let provider = provider_with(&["A1", "A2", "A3", "A4"]).await;
    let results = orchestrator(provider)
        .with_concurrency(1)
        .run(&symbols(&["A1", "A2", "A3", "A4"]))
        .await;
    assert_eq!(results.len(), 4);
    assert!(results.values().all(|r| r.is_ok()));
}

#[tokio::test]
async fn reports_carry_the_analysis_for_their_symbol() {
    let provider = provider_with(&["RELIANCE", "TCS"]).await;
    let results = orchestrator(provider)
        .run(&symbols(&["RELIANCE", "TCS"]))
        .await;

    for symbol in ["RELIANCE", "TCS"] {
        let report = results[symbol].as_ref().unwrap();
        assert_eq!(report.symbol, symbol);
        assert_eq!(report.indicators.rsi, Some(100.0));
    }
}

#[tokio::test]
async fn shutdown_before_start_cancels_remaining_symbols() {
    let provider = provider_with(&["RELIANCE", "TCS"]).await;
    let (tx, rx) = watch::channel(false);
    tx.send(true).unwrap();

    let results = orchestrator(provider)
        .with_shutdown(rx)
        .run(&symbols(&["RELIANCE", "TCS"]))
        .await;

    assert_eq!(results.len(), 2, "cancelled symbols still get entries");
    for outcome in results.values() {
        let failure = outcome.as_ref().unwrap_err();
        assert_eq!(failure.source, EngineError::Cancelled);
    }
}

#[tokio::test]
async fn empty_symbol_list_yields_an_empty_map() {
    let provider = provider_with(&["RELIANCE"]).await;
    let results = orchestrator(provider).run(&[]).await;
    assert!(results.is_empty());
}

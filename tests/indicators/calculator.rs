//! Unit tests for indicator snapshot assembly

use chrono::{Duration, TimeZone, Utc};
use sigvana::error::EngineError;
use sigvana::indicators::IndicatorCalculator;
use sigvana::models::candle::Candle;

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 0.5;
            let low = open.min(close) - 0.5;
            Candle::new("RELIANCE", start + Duration::minutes(i as i64), open, high, low, close, 1_000)
        })
        .collect()
}

#[test]
fn fewer_than_two_candles_is_an_error() {
    let err = IndicatorCalculator::compute(&[]).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientData { required: 2, actual: 0 }));

    let candles = candles_from_closes(&[100.0]);
    let err = IndicatorCalculator::compute(&candles).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientData { required: 2, actual: 1 }));
}

#[test]
fn structurally_invalid_series_is_an_error() {
    let mut candles = candles_from_closes(&vec![100.0; 30]);
    candles[10].low = candles[10].high + 1.0;
    assert!(matches!(
        IndicatorCalculator::compute(&candles),
        Err(EngineError::InvalidInput(_))
    ));
}

#[test]
fn short_series_yields_partial_snapshot_not_error() {
    let candles = candles_from_closes(&vec![100.0; 10]);
    let set = IndicatorCalculator::compute(&candles).unwrap();
    assert!(set.ema_20.is_none());
    assert!(set.ema_50.is_none());
    assert!(set.sma_200.is_none());
    assert!(set.rsi.is_none());
    assert!(set.macd.is_none());
    assert!(set.atr.is_none());
    assert!(set.adx.is_none());
    assert!(set.bollinger.is_none());
    assert!(set.stochastic.is_none());
}

#[test]
fn mid_length_series_fills_only_satisfied_lookbacks() {
    let candles = candles_from_closes(&vec![100.0; 30]);
    let set = IndicatorCalculator::compute(&candles).unwrap();
    assert!(set.ema_20.is_some());
    assert!(set.ema_50.is_none());
    assert!(set.sma_200.is_none());
    assert!(set.rsi.is_some());
    assert!(set.macd.is_none(), "MACD needs 34 candles");
    assert!(set.atr.is_some());
    assert!(set.adx.is_some(), "ADX needs 28 candles");
    assert!(set.bollinger.is_some());
    assert!(set.stochastic.is_some());
}

#[test]
fn snapshot_is_keyed_to_the_last_timestamp() {
    let candles = candles_from_closes(&vec![100.0; 25]);
    let set = IndicatorCalculator::compute(&candles).unwrap();
    assert_eq!(set.symbol, "RELIANCE");
    assert_eq!(set.timestamp, candles[candles.len() - 1].timestamp);
}

#[test]
fn flat_series_snapshot_values() {
    let candles = candles_from_closes(&vec![100.0; 60]);
    let set = IndicatorCalculator::compute(&candles).unwrap();

    assert_eq!(set.ema_20, Some(100.0));
    assert_eq!(set.ema_50, Some(100.0));
    assert!(set.sma_200.is_none());
    // Zero average loss pins RSI at 100.
    assert_eq!(set.rsi, Some(100.0));

    let macd = set.macd.unwrap();
    assert!(macd.macd.abs() < 1e-9);
    assert!(macd.histogram.abs() < 1e-9);

    // Candle factory keeps a constant high-low range of 1.
    assert_eq!(set.atr, Some(1.0));
    assert_eq!(set.adx, Some(0.0));

    let bands = set.bollinger.unwrap();
    assert_eq!(bands.upper, 100.0);
    assert_eq!(bands.lower, 100.0);

    let stoch = set.stochastic.unwrap();
    assert!((stoch.k - 50.0).abs() < 1e-12);
    assert!((stoch.d.unwrap() - 50.0).abs() < 1e-12);
}

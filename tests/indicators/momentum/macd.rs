//! Unit tests for the MACD indicator

use chrono::{Duration, TimeZone, Utc};
use sigvana::indicators::momentum::macd::{calculate_macd, calculate_macd_default};
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
            Candle::new("TCS", start + Duration::minutes(i as i64), open, high, low, close, 1_000)
        })
        .collect()
}

#[test]
fn macd_needs_slow_plus_signal_minus_one_candles() {
    let closes: Vec<f64> = (1..=33).map(|x| 100.0 + x as f64 * 0.1).collect();
    assert!(calculate_macd_default(&candles_from_closes(&closes)).is_none());

    let closes: Vec<f64> = (1..=34).map(|x| 100.0 + x as f64 * 0.1).collect();
    assert!(calculate_macd_default(&candles_from_closes(&closes)).is_some());
}

#[test]
fn macd_of_flat_series_is_zero() {
    let candles = candles_from_closes(&vec![100.0; 50]);
    let macd = calculate_macd_default(&candles).unwrap();
    assert!(macd.macd.abs() < 1e-9);
    assert!(macd.signal.abs() < 1e-9);
    assert!(macd.histogram.abs() < 1e-9);
}

#[test]
fn macd_positive_in_a_sustained_uptrend() {
    // The fast EMA sits above the slow EMA while prices keep rising.
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let macd = calculate_macd_default(&candles_from_closes(&closes)).unwrap();
    assert!(macd.macd > 0.0, "macd line {} should be positive", macd.macd);
    assert!(macd.signal > 0.0, "signal line {} should be positive", macd.signal);
}

#[test]
fn macd_negative_in_a_sustained_downtrend() {
    let closes: Vec<f64> = (0..60).map(|i| 200.0 - i as f64).collect();
    let macd = calculate_macd_default(&candles_from_closes(&closes)).unwrap();
    assert!(macd.macd < 0.0);
    assert!(macd.signal < 0.0);
}

#[test]
fn macd_histogram_is_line_minus_signal() {
    let closes: Vec<f64> = (0..60)
        .map(|i| 100.0 + (i as f64 * 0.7).sin() * 3.0)
        .collect();
    let macd = calculate_macd_default(&candles_from_closes(&closes)).unwrap();
    assert!((macd.histogram - (macd.macd - macd.signal)).abs() < 1e-12);
}

#[test]
fn macd_rejects_degenerate_periods() {
    let candles = candles_from_closes(&vec![100.0; 50]);
    assert!(calculate_macd(&candles, 0, 26, 9).is_none());
    assert!(calculate_macd(&candles, 26, 26, 9).is_none());
    assert!(calculate_macd(&candles, 12, 26, 0).is_none());
}

//! Unit tests for the stochastic oscillator

use chrono::{Duration, TimeZone, Utc};
use sigvana::indicators::momentum::stochastic::{
    calculate_stochastic, calculate_stochastic_default,
};
use sigvana::models::candle::Candle;

fn flat_candles(count: usize, price: f64) -> Vec<Candle> {
    // High equals low: a perfectly flat window.
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            Candle::new("INFY", start + Duration::minutes(i as i64), price, price, price, price, 500)
        })
        .collect()
}

fn rising_candles(count: usize) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let close = 100.0 + i as f64;
            let open = if i == 0 { close } else { close - 1.0 };
            Candle::new(
                "INFY",
                start + Duration::minutes(i as i64),
                open,
                close + 0.5,
                open - 0.5,
                close,
                500,
            )
        })
        .collect()
}

#[test]
fn k_is_neutral_50_on_flat_windows_of_any_size() {
    for k_period in [5, 14, 20] {
        let candles = flat_candles(k_period + 4, 250.0);
        let stoch = calculate_stochastic(&candles, k_period, 3).unwrap();
        assert!(
            (stoch.k - 50.0).abs() < 1e-12,
            "%K should be 50 for flat window size {k_period}, got {}",
            stoch.k
        );
        assert!((stoch.d.unwrap() - 50.0).abs() < 1e-12);
    }
}

#[test]
fn absent_below_k_period() {
    let candles = rising_candles(13);
    assert!(calculate_stochastic_default(&candles).is_none());
}

#[test]
fn d_absent_until_three_k_values_exist() {
    let candles = rising_candles(14);
    let stoch = calculate_stochastic_default(&candles).unwrap();
    assert!(stoch.d.is_none(), "one %K value cannot support %D");

    let candles = rising_candles(16);
    let stoch = calculate_stochastic_default(&candles).unwrap();
    assert!(stoch.d.is_some());
}

#[test]
fn k_is_high_when_close_sits_near_the_window_top() {
    let candles = rising_candles(30);
    let stoch = calculate_stochastic_default(&candles).unwrap();
    assert!(stoch.k > 80.0, "rising close should push %K high, got {}", stoch.k);
    assert!((0.0..=100.0).contains(&stoch.k));
}

#[test]
fn k_is_low_when_close_sits_near_the_window_bottom() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let candles: Vec<Candle> = (0..30)
        .map(|i| {
            let close = 200.0 - i as f64;
            let open = if i == 0 { close } else { close + 1.0 };
            Candle::new(
                "INFY",
                start + Duration::minutes(i as i64),
                open,
                open + 0.5,
                close - 0.5,
                close,
                500,
            )
        })
        .collect();
    let stoch = calculate_stochastic_default(&candles).unwrap();
    assert!(stoch.k < 20.0, "falling close should push %K low, got {}", stoch.k);
}

#[test]
fn zero_periods_are_absent() {
    let candles = rising_candles(30);
    assert!(calculate_stochastic(&candles, 0, 3).is_none());
    assert!(calculate_stochastic(&candles, 14, 0).is_none());
}

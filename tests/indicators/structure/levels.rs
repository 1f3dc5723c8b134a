//! Unit tests for support/resistance level detection

use chrono::{Duration, TimeZone, Utc};
use sigvana::config::DetectorConfig;
use sigvana::indicators::structure::support_resistance::detect_support_resistance;
use sigvana::indicators::structure::LevelDetector;
use sigvana::models::candle::Candle;

fn candle_with_extremes(minute: i64, high: f64, low: f64) -> Candle {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mid = (high + low) / 2.0;
    Candle::new("BANKNIFTY", start + Duration::minutes(minute), mid, high, low, mid, 3_000)
}

fn candles_with_extremes(highs: &[f64], lows: &[f64]) -> Vec<Candle> {
    highs
        .iter()
        .zip(lows)
        .enumerate()
        .map(|(i, (&high, &low))| candle_with_extremes(i as i64, high, low))
        .collect()
}

#[test]
fn too_short_series_yields_empty_sets() {
    // 2 * lookback + 1 candles are required.
    let highs = vec![10.0; 40];
    let lows = vec![5.0; 40];
    let (support, resistance) = detect_support_resistance(&candles_with_extremes(&highs, &lows), 20);
    assert!(support.is_empty());
    assert!(resistance.is_empty());
}

#[test]
fn centered_extremes_become_levels() {
    let mut highs = vec![10.0; 21];
    let mut lows = vec![5.0; 21];
    highs[5] = 12.0;
    highs[10] = 13.0;
    highs[15] = 12.004; // rounds onto the first spike
    lows[7] = 4.0;
    lows[12] = 3.0;

    let candles = candles_with_extremes(&highs, &lows);
    let (support, resistance) = detect_support_resistance(&candles, 2);

    // Plateau candles away from the spikes tie the window extreme and are
    // marked too, so the plateau values appear alongside the spikes.
    assert_eq!(resistance, vec![13.0, 12.0, 10.0]);
    assert_eq!(support, vec![3.0, 4.0, 5.0]);
}

#[test]
fn duplicate_rounded_levels_collapse() {
    let mut highs = vec![10.0; 21];
    let lows = vec![5.0; 21];
    highs[5] = 12.001;
    highs[12] = 12.004;

    let candles = candles_with_extremes(&highs, &lows);
    let (_, resistance) = detect_support_resistance(&candles, 2);
    let twelves = resistance.iter().filter(|&&r| r == 12.0).count();
    assert_eq!(twelves, 1, "rounded duplicates must collapse: {resistance:?}");
}

#[test]
fn level_counts_and_ordering_hold_on_a_deterministic_walk() {
    // Pseudo-random walk from a fixed LCG seed; no clock, no RNG crate.
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut step = || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 11) as f64 / (1u64 << 53) as f64) - 0.5
    };

    let mut price = 500.0;
    let mut highs = Vec::new();
    let mut lows = Vec::new();
    for _ in 0..200 {
        price += step() * 8.0;
        highs.push(price + 2.0 + step().abs() * 3.0);
        lows.push(price - 2.0 - step().abs() * 3.0);
    }

    let candles = candles_with_extremes(&highs, &lows);
    let levels = LevelDetector::new(DetectorConfig::default())
        .detect(&candles)
        .unwrap();

    assert!(levels.support.len() <= 5);
    assert!(levels.resistance.len() <= 5);
    for pair in levels.support.windows(2) {
        assert!(pair[0] < pair[1], "support must ascend: {:?}", levels.support);
    }
    for pair in levels.resistance.windows(2) {
        assert!(
            pair[0] > pair[1],
            "resistance must descend: {:?}",
            levels.resistance
        );
    }
}

#[test]
fn detector_rejects_structurally_invalid_series() {
    let mut candles = candles_with_extremes(&vec![10.0; 41], &vec![5.0; 41]);
    candles[3].high = 1.0; // below the body
    assert!(LevelDetector::default().detect(&candles).is_err());
}

//! Support and resistance level detection
//!
//! A high is resistance when it is the maximum of its centered window, a low
//! is support when it is the minimum of its window.

use crate::common::math;
use crate::models::candle::Candle;

/// Detect support and resistance levels with a centered extremum window.
///
/// For every index with `lookback` candles on each side, the candle's high
/// is marked resistance if it equals the window maximum and its low support
/// if it equals the window minimum. Levels are deduplicated at two decimal
/// places; the five lowest supports (ascending) and five highest resistances
/// (descending) are kept. Series shorter than `2 * lookback + 1` yield empty
/// sets.
pub fn detect_support_resistance(candles: &[Candle], lookback: usize) -> (Vec<f64>, Vec<f64>) {
    if lookback == 0 || candles.len() < 2 * lookback + 1 {
        return (Vec::new(), Vec::new());
    }

    let mut support = Vec::new();
    let mut resistance = Vec::new();

    for i in lookback..candles.len() - lookback {
        let window = &candles[i - lookback..=i + lookback];
        let window_high = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let window_low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);

        if candles[i].high == window_high {
            resistance.push(math::round2(candles[i].high));
        }
        if candles[i].low == window_low {
            support.push(math::round2(candles[i].low));
        }
    }

    support.sort_by(|a, b| a.partial_cmp(b).unwrap());
    support.dedup();
    support.truncate(5);

    resistance.sort_by(|a, b| b.partial_cmp(a).unwrap());
    resistance.dedup();
    resistance.truncate(5);

    (support, resistance)
}

//! Stochastic oscillator
//!
//! %K = 100 * (close - lowestLow) / (highestHigh - lowestLow)
//! %D = SMA(d_period) of the %K series

use crate::common::math;
use crate::models::candle::Candle;
use crate::models::indicators::StochasticIndicator;

/// Calculate the stochastic oscillator.
///
/// %K is computed for every window of `k_period` candles; the reported value
/// is the most recent one. %D needs `d_period` %K values and is absent until
/// the series is long enough. A flat window (highest high equals lowest low)
/// yields the neutral %K of 50 rather than a division error.
pub fn calculate_stochastic(
    candles: &[Candle],
    k_period: usize,
    d_period: usize,
) -> Option<StochasticIndicator> {
    if k_period == 0 || d_period == 0 || candles.len() < k_period {
        return None;
    }

    let k_values: Vec<f64> = candles
        .windows(k_period)
        .map(|window| {
            let close = window[window.len() - 1].close;
            let lowest_low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
            let highest_high = window
                .iter()
                .map(|c| c.high)
                .fold(f64::NEG_INFINITY, f64::max);
            if highest_high == lowest_low {
                50.0
            } else {
                100.0 * (close - lowest_low) / (highest_high - lowest_low)
            }
        })
        .collect();

    let k = *k_values.last()?;
    let d = math::sma(&k_values, d_period);

    Some(StochasticIndicator { k, d })
}

/// Calculate the stochastic oscillator with default periods (14, 3).
pub fn calculate_stochastic_default(candles: &[Candle]) -> Option<StochasticIndicator> {
    calculate_stochastic(candles, 14, 3)
}

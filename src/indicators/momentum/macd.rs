//! MACD (Moving Average Convergence Divergence) indicator
//!
//! MACD = EMA(fast) - EMA(slow)
//! Signal = EMA(signal_period) of the MACD series
//! Histogram = MACD - Signal

use crate::common::math;
use crate::models::candle::Candle;
use crate::models::indicators::MacdIndicator;

/// Calculate MACD with a signal line derived from the full MACD series.
///
/// The fast and slow EMAs are computed as parallel series (not single final
/// values) so the signal line, an EMA of the MACD line itself, is
/// well-defined. Needs `slow + signal - 1` candles for the first signal
/// value.
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Option<MacdIndicator> {
    if fast_period == 0 || fast_period >= slow_period || signal_period == 0 {
        return None;
    }
    if candles.len() < slow_period + signal_period - 1 {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let fast_series = math::ema_series(&closes, fast_period);
    let slow_series = math::ema_series(&closes, slow_period);

    // The slow series starts later; align the fast series to it.
    let offset = slow_period - fast_period;
    let macd_series: Vec<f64> = slow_series
        .iter()
        .enumerate()
        .map(|(i, slow)| fast_series[i + offset] - slow)
        .collect();

    let signal_line = math::ema(&macd_series, signal_period)?;
    let macd_line = *macd_series.last()?;

    Some(MacdIndicator {
        macd: macd_line,
        signal: signal_line,
        histogram: macd_line - signal_line,
    })
}

/// Calculate MACD with the default periods (12, 26, 9).
pub fn calculate_macd_default(candles: &[Candle]) -> Option<MacdIndicator> {
    calculate_macd(candles, 12, 26, 9)
}

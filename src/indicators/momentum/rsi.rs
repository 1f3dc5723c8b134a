//! RSI (Relative Strength Index) indicator
//!
//! RSI = 100 - (100 / (1 + RS))
//! RS = Average Gain / Average Loss, Wilder-smoothed

use crate::common::math;
use crate::models::candle::Candle;

/// Calculate RSI with Wilder smoothing.
///
/// The first `period` close-to-close deltas seed the average gain and loss;
/// every later delta is folded in with `avg = (avg * (period-1) + new) / period`.
/// When the average loss is exactly zero the RSI is 100 by definition.
pub fn calculate_rsi(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period + 1 {
        return None;
    }

    let deltas: Vec<f64> = candles.windows(2).map(|w| w[1].close - w[0].close).collect();

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for &delta in &deltas[..period] {
        if delta > 0.0 {
            avg_gain += delta;
        } else {
            avg_loss += delta.abs();
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    for &delta in &deltas[period..] {
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { delta.abs() } else { 0.0 };
        avg_gain = math::wilder_smooth(avg_gain, gain, period);
        avg_loss = math::wilder_smooth(avg_loss, loss, period);
    }

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Calculate RSI with the default period (14).
pub fn calculate_rsi_default(candles: &[Candle]) -> Option<f64> {
    calculate_rsi(candles, 14)
}

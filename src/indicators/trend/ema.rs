//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::candle::Candle;

/// Calculate EMA of closing prices for a specific period.
///
/// Seeded with the SMA of the first `period` closes, then the recurrence
/// `ema = close * k + ema_prev * (1 - k)` with `k = 2/(period+1)` applied
/// strictly in chronological order.
pub fn calculate_ema(candles: &[Candle], period: usize) -> Option<f64> {
    if candles.len() < period {
        return None;
    }
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::ema(&closes, period)
}

//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::models::candle::Candle;

/// Calculate SMA of the last `period` closing prices.
pub fn calculate_sma(candles: &[Candle], period: usize) -> Option<f64> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::sma(&closes, period)
}

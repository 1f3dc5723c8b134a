//! Bollinger Bands indicator
//!
//! Middle Band = SMA(period)
//! Upper Band = Middle + (std_dev * population standard deviation)
//! Lower Band = Middle - (std_dev * population standard deviation)

use crate::common::math;
use crate::models::candle::Candle;
use crate::models::indicators::BollingerBands;

/// Calculate Bollinger Bands over the last `period` closes.
pub fn calculate_bollinger_bands(
    candles: &[Candle],
    period: usize,
    std_dev: f64,
) -> Option<BollingerBands> {
    if candles.len() < period {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let middle = math::sma(&closes, period)?;
    let std = math::std_dev(&closes, period)?;

    Some(BollingerBands {
        upper: middle + std_dev * std,
        middle,
        lower: middle - std_dev * std,
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ).
pub fn calculate_bollinger_bands_default(candles: &[Candle]) -> Option<BollingerBands> {
    calculate_bollinger_bands(candles, 20, 2.0)
}

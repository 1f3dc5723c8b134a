//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::candle::Candle;

/// Calculate ATR with Wilder smoothing.
///
/// `TR = max(high - low, |high - prevClose|, |low - prevClose|)`; the first
/// `period` true ranges seed the average, later ones are Wilder-smoothed.
pub fn calculate_atr(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period + 1 {
        return None;
    }

    let tr_values: Vec<f64> = candles
        .windows(2)
        .map(|pair| math::true_range(pair[1].high, pair[1].low, pair[0].close))
        .collect();

    let mut atr = tr_values[..period].iter().sum::<f64>() / period as f64;
    for &tr in &tr_values[period..] {
        atr = math::wilder_smooth(atr, tr, period);
    }
    Some(atr)
}

/// Calculate ATR with the default period (14).
pub fn calculate_atr_default(candles: &[Candle]) -> Option<f64> {
    calculate_atr(candles, 14)
}

//! ADX (Average Directional Index) indicator

use crate::common::math;
use crate::models::candle::Candle;

/// Calculate ADX over `period` using Wilder's directional-movement smoothing.
///
/// True range and the directional movements are Wilder-smoothed, the DX
/// series is averaged over the first `period` values to seed ADX, and
/// subsequent DX values are folded in with the same smoothing. The first
/// ADX value needs `period` DX values, so the series must hold at least
/// `2 * period` candles.
pub fn calculate_adx(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < 2 * period {
        return None;
    }

    let mut tr_values = Vec::with_capacity(candles.len() - 1);
    let mut plus_dm_values = Vec::with_capacity(candles.len() - 1);
    let mut minus_dm_values = Vec::with_capacity(candles.len() - 1);

    for pair in candles.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);
        tr_values.push(math::true_range(current.high, current.low, prev.close));

        let up_move = current.high - prev.high;
        let down_move = prev.low - current.low;
        plus_dm_values.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm_values.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
    }

    // Wilder-smoothed TR and DM, seeded with the mean of the first `period`
    // deltas, then walked forward to produce one DX per remaining delta.
    let n = period as f64;
    let mut smoothed_tr = tr_values[..period].iter().sum::<f64>() / n;
    let mut smoothed_plus = plus_dm_values[..period].iter().sum::<f64>() / n;
    let mut smoothed_minus = minus_dm_values[..period].iter().sum::<f64>() / n;

    let mut dx_values = Vec::with_capacity(tr_values.len() - period + 1);
    dx_values.push(directional_index(smoothed_plus, smoothed_minus, smoothed_tr));

    for i in period..tr_values.len() {
        smoothed_tr = math::wilder_smooth(smoothed_tr, tr_values[i], period);
        smoothed_plus = math::wilder_smooth(smoothed_plus, plus_dm_values[i], period);
        smoothed_minus = math::wilder_smooth(smoothed_minus, minus_dm_values[i], period);
        dx_values.push(directional_index(smoothed_plus, smoothed_minus, smoothed_tr));
    }

    let mut adx = dx_values[..period].iter().sum::<f64>() / n;
    for &dx in &dx_values[period..] {
        adx = math::wilder_smooth(adx, dx, period);
    }
    Some(adx)
}

/// DX from smoothed directional movement; zero when there is no range at all.
fn directional_index(smoothed_plus: f64, smoothed_minus: f64, smoothed_tr: f64) -> f64 {
    if smoothed_tr <= 0.0 {
        return 0.0;
    }
    let plus_di = 100.0 * smoothed_plus / smoothed_tr;
    let minus_di = 100.0 * smoothed_minus / smoothed_tr;
    let di_sum = plus_di + minus_di;
    if di_sum <= 0.0 {
        return 0.0;
    }
    100.0 * (plus_di - minus_di).abs() / di_sum
}

//! Shared numeric kernels used by the indicator modules

/// Arithmetic mean of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let sum: f64 = values[values.len() - period..].iter().sum();
    Some(sum / period as f64)
}

/// Exponential moving average over the full slice.
///
/// Seeded with the SMA of the first `period` values, then the standard
/// recurrence `ema = value * k + ema_prev * (1 - k)` with `k = 2/(period+1)`
/// applied in chronological order. Returns the final value.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    ema_series(values, period).last().copied()
}

/// Full EMA series, one value per input index starting at `period - 1`.
///
/// The first element is the SMA seed; subsequent elements follow the
/// recurrence. Empty when the slice is shorter than `period`.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    let seed: f64 = values[..period].iter().sum::<f64>() / period as f64;
    let mut series = Vec::with_capacity(values.len() - period + 1);
    series.push(seed);
    let mut prev = seed;
    for &value in &values[period..] {
        prev = ema_from_previous(value, prev, period);
        series.push(prev);
    }
    series
}

/// One EMA recurrence step.
pub fn ema_from_previous(value: f64, prev: f64, period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    value * k + prev * (1.0 - k)
}

/// One Wilder smoothing step: `(prev * (period - 1) + value) / period`.
pub fn wilder_smooth(prev: f64, value: f64, period: usize) -> f64 {
    let n = period as f64;
    (prev * (n - 1.0) + value) / n
}

/// Population standard deviation of the last `period` values.
pub fn std_dev(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
    Some(variance.sqrt())
}

/// True range of a candle relative to the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Slope of the least-squares line fitted over `values` with x = 0, 1, 2, ...
pub fn linear_slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let n_f = n as f64;
    let x_mean = (n_f - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n_f;
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }
    Some(numerator / denominator)
}

/// Round to two decimal places (price-level deduplication granularity).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

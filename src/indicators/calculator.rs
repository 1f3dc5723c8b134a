//! Indicator snapshot assembly

use tracing::debug;

use crate::error::EngineError;
use crate::indicators::momentum::{macd, rsi, stochastic};
use crate::indicators::trend::{adx, ema, sma};
use crate::indicators::volatility::{atr, bollinger};
use crate::models::candle::{validate_series, Candle};
use crate::models::indicators::IndicatorSet;

/// Computes the full indicator snapshot for one series.
///
/// Every indicator whose lookback the series satisfies is present; the rest
/// stay absent. The call itself fails only when the series is structurally
/// invalid or too short for even the shortest lookback.
pub struct IndicatorCalculator;

impl IndicatorCalculator {
    /// Minimum candles for any indicator at all.
    pub const MIN_CANDLES: usize = 2;

    pub fn compute(candles: &[Candle]) -> Result<IndicatorSet, EngineError> {
        validate_series(candles)?;
        if candles.len() < Self::MIN_CANDLES {
            return Err(EngineError::InsufficientData {
                required: Self::MIN_CANDLES,
                actual: candles.len(),
            });
        }

        // Series is non-empty past the length check.
        let last = &candles[candles.len() - 1];
        let mut set = IndicatorSet::new(last.symbol.clone(), last.timestamp);

        set.ema_20 = ema::calculate_ema(candles, 20);
        set.ema_50 = ema::calculate_ema(candles, 50);
        set.sma_200 = sma::calculate_sma(candles, 200);
        set.rsi = rsi::calculate_rsi_default(candles);
        set.macd = macd::calculate_macd_default(candles);
        set.atr = atr::calculate_atr_default(candles);
        set.adx = adx::calculate_adx(candles, 14);
        set.bollinger = bollinger::calculate_bollinger_bands_default(candles);
        set.stochastic = stochastic::calculate_stochastic_default(candles);

        debug!(
            symbol = %set.symbol,
            candles = candles.len(),
            rsi = ?set.rsi,
            ema_20 = ?set.ema_20,
            "indicator snapshot computed"
        );

        Ok(set)
    }
}

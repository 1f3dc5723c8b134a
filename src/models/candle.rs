//! OHLCV candle and series validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One OHLCV bar for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Candle {
    pub fn new(
        symbol: impl Into<String>,
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Check the OHLC invariant: all prices positive and finite, and
    /// `low <= min(open, close) <= max(open, close) <= high`.
    ///
    /// Violations are rejected, never clamped.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::invalid_input(format!(
                    "{}: {} price must be positive and finite, got {}",
                    self.symbol, name, value
                )));
            }
        }
        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        if self.low > body_low || body_high > self.high {
            return Err(EngineError::invalid_input(format!(
                "{}: OHLC bounds violated at {} (o={} h={} l={} c={})",
                self.symbol, self.timestamp, self.open, self.high, self.low, self.close
            )));
        }
        Ok(())
    }
}

/// Validate a full series: every candle passes its own invariant, all
/// candles carry the same symbol, and timestamps ascend without duplicates.
pub fn validate_series(candles: &[Candle]) -> Result<(), EngineError> {
    for candle in candles {
        candle.validate()?;
    }
    for pair in candles.windows(2) {
        if pair[1].symbol != pair[0].symbol {
            return Err(EngineError::invalid_input(format!(
                "mixed symbols in series: {} and {}",
                pair[0].symbol, pair[1].symbol
            )));
        }
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(EngineError::invalid_input(format!(
                "{}: timestamps must be strictly ascending ({} then {})",
                pair[0].symbol, pair[0].timestamp, pair[1].timestamp
            )));
        }
    }
    Ok(())
}

/// Closing prices of a series, in chronological order.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

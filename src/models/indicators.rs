//! Indicator snapshot data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Stochastic oscillator snapshot.
///
/// `%D` is the SMA(3) of the `%K` series and needs two extra candles, so it
/// can be absent while `%K` is already available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StochasticIndicator {
    pub k: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<f64>,
}

/// Per-series indicator snapshot, keyed to the series' last timestamp.
///
/// A field is `None` when the series is shorter than that indicator's
/// lookback; absence is distinguishable from a computed zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_20: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_50: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma_200: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<BollingerBands>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stochastic: Option<StochasticIndicator>,
}

impl IndicatorSet {
    pub fn new(symbol: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp,
            ema_20: None,
            ema_50: None,
            sma_200: None,
            rsi: None,
            macd: None,
            atr: None,
            adx: None,
            bollinger: None,
            stochastic: None,
        }
    }
}

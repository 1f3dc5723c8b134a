//! Per-symbol analysis pipeline
//!
//! Indicators and levels are computed independently from the same series,
//! then combined by the signal rules. The whole pipeline is synchronous and
//! side-effect-free; no state survives the call.

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::EngineError;
use crate::indicators::structure::LevelDetector;
use crate::indicators::IndicatorCalculator;
use crate::models::candle::Candle;
use crate::models::indicators::IndicatorSet;
use crate::models::levels::LevelSet;
use crate::models::signal::SignalBundle;
use crate::models::trade::MarketConditions;
use crate::risk::validator::assess_market_conditions;
use crate::signals::SignalGenerator;

/// Full analysis output for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolReport {
    pub symbol: String,
    pub indicators: IndicatorSet,
    pub levels: LevelSet,
    pub signals: SignalBundle,
    pub conditions: MarketConditions,
}

/// Runs the indicator → level → signal pipeline for one series.
pub struct Analyzer {
    detector: LevelDetector,
}

impl Analyzer {
    pub fn new(config: &Config) -> Self {
        Self {
            detector: LevelDetector::new(config.detector.clone()),
        }
    }

    /// Analyze one series.
    ///
    /// Fails on structurally invalid input or a series too short for any
    /// indicator; otherwise degraded sub-results (absent indicator fields,
    /// empty level sets) flow through as data.
    pub fn analyze(&self, candles: &[Candle]) -> Result<SymbolReport, EngineError> {
        let indicators = IndicatorCalculator::compute(candles)?;
        let levels = self.detector.detect(candles)?;
        let signals = SignalGenerator::generate(&indicators, &levels, candles);

        // Non-empty past compute's length check.
        let last = &candles[candles.len() - 1];
        let conditions = assess_market_conditions(&indicators, last.close);

        debug!(
            symbol = %indicators.symbol,
            signals = signals.signals.len(),
            trend = ?signals.trend,
            "symbol analysis complete"
        );

        Ok(SymbolReport {
            symbol: indicators.symbol.clone(),
            indicators,
            levels,
            signals,
            conditions,
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

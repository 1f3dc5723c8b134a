//! Level detection entry point combining levels and patterns

use tracing::debug;

use crate::config::DetectorConfig;
use crate::error::EngineError;
use crate::indicators::structure::{patterns, support_resistance};
use crate::models::candle::{validate_series, Candle};
use crate::models::levels::LevelSet;

/// Detects support/resistance levels and chart patterns for one series.
pub struct LevelDetector {
    config: DetectorConfig,
}

impl LevelDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Detect levels and patterns.
    ///
    /// Fails only on structurally invalid input; a series too short for
    /// either detection step degrades to empty sets.
    pub fn detect(&self, candles: &[Candle]) -> Result<LevelSet, EngineError> {
        validate_series(candles)?;

        let (support, resistance) =
            support_resistance::detect_support_resistance(candles, self.config.level_lookback);
        let patterns = patterns::detect_patterns(candles, &self.config);

        if let Some(first) = candles.first() {
            debug!(
                symbol = %first.symbol,
                support = support.len(),
                resistance = resistance.len(),
                patterns = ?patterns,
                "level detection complete"
            );
        }

        Ok(LevelSet {
            support,
            resistance,
            patterns,
        })
    }
}

impl Default for LevelDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

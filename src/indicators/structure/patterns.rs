//! Simple chart pattern detection over recent closes

use crate::common::math;
use crate::config::DetectorConfig;
use crate::models::candle::Candle;
use crate::models::levels::PatternTag;

/// Closes used for the least-squares trend fit.
pub const TREND_WINDOW: usize = 10;
/// Closes treated as "recent" by breakout detection.
pub const RECENT_WINDOW: usize = 5;
/// Closes before the recent window that set the prior extreme.
pub const PRIOR_WINDOW: usize = 15;
/// Candles required before any pattern is reported.
pub const MIN_CANDLES: usize = RECENT_WINDOW + PRIOR_WINDOW;

/// Detect trend and breakout patterns from the last closes.
///
/// The trend tag compares the least-squares slope of the last
/// [`TREND_WINDOW`] closes against the configured threshold; breakouts
/// compare the recent extreme to the prior extreme scaled by the configured
/// multiplier. Fewer than [`MIN_CANDLES`] candles yield an empty set.
pub fn detect_patterns(candles: &[Candle], config: &DetectorConfig) -> Vec<PatternTag> {
    if candles.len() < MIN_CANDLES {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let mut patterns = Vec::new();

    if let Some(slope) = math::linear_slope(&closes[closes.len() - TREND_WINDOW..]) {
        if slope > config.trend_slope_threshold {
            patterns.push(PatternTag::Uptrend);
        } else if slope < -config.trend_slope_threshold {
            patterns.push(PatternTag::Downtrend);
        }
    }

    let recent = &closes[closes.len() - RECENT_WINDOW..];
    let prior = &closes[closes.len() - MIN_CANDLES..closes.len() - RECENT_WINDOW];

    let recent_high = recent.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let prior_high = prior.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    if recent_high > prior_high * config.breakout_multiplier {
        patterns.push(PatternTag::BreakoutResistance);
    }

    let recent_low = recent.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let prior_low = prior.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    if recent_low < prior_low * config.breakdown_multiplier {
        patterns.push(PatternTag::BreakdownSupport);
    }

    patterns
}

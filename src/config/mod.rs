//! Environment-backed configuration with engine tunables
//!
//! Detection thresholds and risk limits are named configuration rather than
//! hard-coded literals; defaults follow the calibration the engine shipped
//! with and every value can be overridden through `SIGVANA_*` variables.

use std::env;

/// Deployment environment name, read from `SIGVANA_ENV`.
pub fn get_environment() -> String {
    env::var("SIGVANA_ENV").unwrap_or_else(|_| "development".to_string())
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Tunables for support/resistance and pattern detection.
///
/// The slope threshold is unitless relative to the price scale and the
/// breakout multipliers are calibration constants, not universal laws.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Half-width of the centered extremum window.
    pub level_lookback: usize,
    /// Least-squares slope above which the last closes count as trending.
    pub trend_slope_threshold: f64,
    /// Recent high must exceed the prior high by this factor to tag a breakout.
    pub breakout_multiplier: f64,
    /// Recent low must undercut the prior low by this factor to tag a breakdown.
    pub breakdown_multiplier: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            level_lookback: 20,
            trend_slope_threshold: 0.5,
            breakout_multiplier: 1.02,
            breakdown_multiplier: 0.98,
        }
    }
}

impl DetectorConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            level_lookback: env_usize("SIGVANA_LEVEL_LOOKBACK", default.level_lookback),
            trend_slope_threshold: env_f64(
                "SIGVANA_TREND_SLOPE_THRESHOLD",
                default.trend_slope_threshold,
            ),
            breakout_multiplier: env_f64(
                "SIGVANA_BREAKOUT_MULTIPLIER",
                default.breakout_multiplier,
            ),
            breakdown_multiplier: env_f64(
                "SIGVANA_BREAKDOWN_MULTIPLIER",
                default.breakdown_multiplier,
            ),
        }
    }
}

/// Hard limits applied by trade validation and the portfolio report.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskLimits {
    /// Minimum risk/reward ratio to the first target.
    pub min_risk_reward: f64,
    /// Maximum share of the portfolio a single position may occupy.
    pub max_position_portfolio_pct: f64,
    /// Ceiling on summed risk percent across open trades.
    pub max_portfolio_risk_percent: f64,
    /// Confidence floor below which a trade draws an informational warning.
    pub min_confidence: f64,
    /// Stop distances outside this percent band draw informational warnings.
    pub stop_tight_pct: f64,
    pub stop_wide_pct: f64,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            min_risk_reward: 1.5,
            max_position_portfolio_pct: 0.20,
            max_portfolio_risk_percent: 10.0,
            min_confidence: 60.0,
            stop_tight_pct: 0.5,
            stop_wide_pct: 5.0,
        }
    }
}

impl RiskLimits {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            min_risk_reward: env_f64("SIGVANA_MIN_RISK_REWARD", default.min_risk_reward),
            max_position_portfolio_pct: env_f64(
                "SIGVANA_MAX_POSITION_PCT",
                default.max_position_portfolio_pct,
            ),
            max_portfolio_risk_percent: env_f64(
                "SIGVANA_MAX_PORTFOLIO_RISK",
                default.max_portfolio_risk_percent,
            ),
            min_confidence: env_f64("SIGVANA_MIN_CONFIDENCE", default.min_confidence),
            stop_tight_pct: env_f64("SIGVANA_STOP_TIGHT_PCT", default.stop_tight_pct),
            stop_wide_pct: env_f64("SIGVANA_STOP_WIDE_PCT", default.stop_wide_pct),
        }
    }
}

/// Batch fan-out settings.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Maximum symbol tasks in flight at once.
    pub max_concurrency: usize,
    /// Candles requested per symbol from the data provider.
    pub candle_limit: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 10,
            candle_limit: 250,
        }
    }
}

impl BatchConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrency: env_usize("SIGVANA_BATCH_CONCURRENCY", default.max_concurrency),
            candle_limit: env_usize("SIGVANA_CANDLE_LIMIT", default.candle_limit),
        }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub detector: DetectorConfig,
    pub risk: RiskLimits,
    pub batch: BatchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            detector: DetectorConfig::default(),
            risk: RiskLimits::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            detector: DetectorConfig::from_env(),
            risk: RiskLimits::from_env(),
            batch: BatchConfig::from_env(),
        }
    }
}

//! Trade validation and position sizing
//!
//! Validation runs a fixed sequence of checks, each appending at most one
//! warning; informational checks never flip validity, hard checks do. All
//! checks always run; a failing check never short-circuits the rest.
//! Numeric nonsense (zero stop distance, negative money) is a hard error,
//! never a warning.

use tracing::debug;

use crate::config::RiskLimits;
use crate::error::EngineError;
use crate::models::indicators::IndicatorSet;
use crate::models::trade::{
    MarketConditions, RiskProfile, TradeAssessment, TradeProposal, TrendStrength,
    ValidationResult, VolatilityLevel,
};

/// ADX above this counts as a strong trend.
const ADX_STRONG: f64 = 25.0;
/// ADX below this counts as a weak trend.
const ADX_WEAK: f64 = 20.0;
/// ATR as percent of price above this counts as high volatility.
const ATR_PCT_HIGH: f64 = 3.0;
/// ATR as percent of price below this counts as low volatility.
const ATR_PCT_LOW: f64 = 1.0;

pub struct RiskValidator {
    limits: RiskLimits,
}

impl RiskValidator {
    pub fn new(limits: RiskLimits) -> Self {
        Self { limits }
    }

    /// Validate a proposal against a risk profile.
    ///
    /// Returns the derived position size, the risk/reward ratio to the first
    /// target and the accumulated validation outcome. Fails with
    /// `InvalidInput` before any check runs when the proposal or profile is
    /// numerically malformed.
    pub fn validate(
        &self,
        trade: &TradeProposal,
        profile: &RiskProfile,
    ) -> Result<TradeAssessment, EngineError> {
        trade.validate()?;
        profile.validate()?;

        let mut warnings = Vec::new();
        let mut is_valid = true;
        let stop_distance = trade.stop_distance();

        // 1. Stop distance, informational only.
        let stop_pct = stop_distance / trade.entry * 100.0;
        if stop_pct < self.limits.stop_tight_pct {
            warnings.push(format!(
                "Stop loss too tight ({:.2}% < {:.1}%), may get stopped out prematurely",
                stop_pct, self.limits.stop_tight_pct
            ));
        } else if stop_pct > self.limits.stop_wide_pct {
            warnings.push(format!(
                "Stop loss too wide ({:.2}% > {:.1}%), excessive risk per trade",
                stop_pct, self.limits.stop_wide_pct
            ));
        }

        // 2. Risk/reward to the first target.
        let risk_reward = (trade.targets[0] - trade.entry).abs() / stop_distance;
        if risk_reward < self.limits.min_risk_reward {
            warnings.push(format!(
                "Risk/reward ratio {:.2} below minimum {:.2}",
                risk_reward, self.limits.min_risk_reward
            ));
            is_valid = false;
        }

        // 3. Position sizing against the portfolio cap.
        let position_size = position_size(
            trade.entry,
            trade.stop_loss,
            trade.risk_percent,
            profile.portfolio_value,
        );
        let position_value = position_size as f64 * trade.entry;
        let portfolio_pct = position_value / profile.portfolio_value;
        if portfolio_pct > self.limits.max_position_portfolio_pct {
            warnings.push(format!(
                "Position size {:.1}% of portfolio exceeds maximum {:.1}%",
                portfolio_pct * 100.0,
                self.limits.max_position_portfolio_pct * 100.0
            ));
            is_valid = false;
        }

        // 4. Declared risk against the profile's daily cap.
        if trade.risk_percent > profile.max_daily_risk_percent {
            warnings.push(format!(
                "Trade risk {:.1}% exceeds daily limit {:.1}%",
                trade.risk_percent, profile.max_daily_risk_percent
            ));
            is_valid = false;
        }

        // 5. Confidence floor, informational only.
        if trade.confidence < self.limits.min_confidence {
            warnings.push(format!(
                "Low confidence trade ({:.0} < {:.0}), consider reducing position size",
                trade.confidence, self.limits.min_confidence
            ));
        }

        debug!(
            symbol = %trade.symbol,
            position_size,
            risk_reward = format!("{:.2}", risk_reward),
            is_valid,
            warnings = warnings.len(),
            "trade validated"
        );

        Ok(TradeAssessment {
            position_size,
            risk_reward_ratio: risk_reward,
            validation: ValidationResult { is_valid, warnings },
        })
    }

    pub fn limits(&self) -> &RiskLimits {
        &self.limits
    }
}

impl Default for RiskValidator {
    fn default() -> Self {
        Self::new(RiskLimits::default())
    }
}

/// Shares affordable with the risk budget, floored, never below one.
///
/// `riskAmount = portfolioValue * riskPercent / 100`, divided by the stop
/// distance. Callers must have validated that entry and stop differ.
pub fn position_size(entry: f64, stop_loss: f64, risk_percent: f64, portfolio_value: f64) -> u64 {
    let risk_amount = portfolio_value * risk_percent / 100.0;
    let size = (risk_amount / (entry - stop_loss).abs()).floor();
    (size as u64).max(1)
}

/// Assess market conditions from the indicator snapshot.
///
/// Weak trends and high volatility shrink the suggested risk multiplier;
/// the assessment is reported for observability and never gates validity.
pub fn assess_market_conditions(indicators: &IndicatorSet, price: f64) -> MarketConditions {
    let mut conditions = MarketConditions {
        trend_strength: TrendStrength::Neutral,
        volatility: VolatilityLevel::Normal,
        risk_adjustment: 1.0,
    };

    if let Some(adx) = indicators.adx {
        if adx > ADX_STRONG {
            conditions.trend_strength = TrendStrength::Strong;
        } else if adx < ADX_WEAK {
            conditions.trend_strength = TrendStrength::Weak;
            conditions.risk_adjustment *= 0.8;
        }
    }

    if let Some(atr) = indicators.atr {
        if price > 0.0 {
            let atr_pct = atr / price * 100.0;
            if atr_pct > ATR_PCT_HIGH {
                conditions.volatility = VolatilityLevel::High;
                conditions.risk_adjustment *= 0.7;
            } else if atr_pct < ATR_PCT_LOW {
                conditions.volatility = VolatilityLevel::Low;
            }
        }
    }

    conditions
}

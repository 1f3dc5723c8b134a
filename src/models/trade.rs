//! Trade proposal, risk profile and validation data models

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Per-user risk configuration supplied by the surrounding service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub max_daily_risk_percent: f64,
    pub portfolio_value: f64,
    pub default_position_size: f64,
    pub allow_shorting: bool,
}

impl RiskProfile {
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, value) in [
            ("max_daily_risk_percent", self.max_daily_risk_percent),
            ("portfolio_value", self.portfolio_value),
            ("default_position_size", self.default_position_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::invalid_input(format!(
                    "risk profile {} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// A proposed trade to validate and size.
///
/// Position size and risk/reward ratio are derived per validation call and
/// never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeProposal {
    pub symbol: String,
    pub entry: f64,
    pub stop_loss: f64,
    /// Exactly two targets, ascending by distance from the entry.
    pub targets: [f64; 2],
    pub risk_percent: f64,
    /// 0-100, supplied by the idea-generation collaborator.
    pub confidence: f64,
}

impl TradeProposal {
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, value) in [
            ("entry", self.entry),
            ("stop_loss", self.stop_loss),
            ("target 1", self.targets[0]),
            ("target 2", self.targets[1]),
            ("risk_percent", self.risk_percent),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::invalid_input(format!(
                    "{}: {} must be positive, got {}",
                    self.symbol, name, value
                )));
            }
        }
        if self.entry == self.stop_loss {
            return Err(EngineError::invalid_input(format!(
                "{}: entry and stop loss are both {}, stop distance is zero",
                self.symbol, self.entry
            )));
        }
        if (self.targets[1] - self.entry).abs() < (self.targets[0] - self.entry).abs() {
            return Err(EngineError::invalid_input(format!(
                "{}: targets must ascend by distance from entry ({:?} from {})",
                self.symbol, self.targets, self.entry
            )));
        }
        if !self.confidence.is_finite() || !(0.0..=100.0).contains(&self.confidence) {
            return Err(EngineError::invalid_input(format!(
                "{}: confidence must be within 0-100, got {}",
                self.symbol, self.confidence
            )));
        }
        Ok(())
    }

    /// Distance from entry to stop, always positive for a valid proposal.
    pub fn stop_distance(&self) -> f64 {
        (self.entry - self.stop_loss).abs()
    }
}

/// Outcome of the ordered validation checks.
///
/// Computed fresh per call and never mutated after return; warnings keep
/// the order the checks ran in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub warnings: Vec<String>,
}

/// Sizing and validation computed for one proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeAssessment {
    pub position_size: u64,
    pub risk_reward_ratio: f64,
    pub validation: ValidationResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStrength {
    Strong,
    Weak,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityLevel {
    High,
    Low,
    Normal,
}

/// Market-condition assessment derived from the indicator snapshot.
///
/// Reported for observability only; it never gates trade validity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConditions {
    pub trend_strength: TrendStrength,
    pub volatility: VolatilityLevel,
    pub risk_adjustment: f64,
}

/// Portfolio-level aggregate across open trade proposals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub total_risk_percent: f64,
    pub total_exposure: f64,
    pub position_count: usize,
    pub avg_confidence: f64,
    pub warnings: Vec<String>,
}

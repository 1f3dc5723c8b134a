//! Portfolio-level risk aggregation

use std::collections::HashSet;

use tracing::debug;

use crate::config::RiskLimits;
use crate::error::EngineError;
use crate::models::trade::{RiskProfile, RiskReport, TradeProposal};
use crate::risk::validator::position_size;

/// Aggregate risk across open trade proposals.
///
/// Sums declared risk percent, warns when the total exceeds the configured
/// ceiling and when the same symbol appears more than once. Exposure is
/// re-derived per trade with the sizing formula; proposals never store a
/// position size. Average confidence and total exposure are observability
/// fields; they never affect validity.
pub fn aggregate_risk(
    trades: &[TradeProposal],
    profile: &RiskProfile,
    limits: &RiskLimits,
) -> Result<RiskReport, EngineError> {
    profile.validate()?;

    if trades.is_empty() {
        return Ok(RiskReport {
            total_risk_percent: 0.0,
            total_exposure: 0.0,
            position_count: 0,
            avg_confidence: 0.0,
            warnings: vec!["No open positions".to_string()],
        });
    }

    for trade in trades {
        trade.validate()?;
    }

    let total_risk_percent: f64 = trades.iter().map(|t| t.risk_percent).sum();
    let total_exposure: f64 = trades
        .iter()
        .map(|t| {
            let size = position_size(t.entry, t.stop_loss, t.risk_percent, profile.portfolio_value);
            size as f64 * t.entry
        })
        .sum();
    let avg_confidence =
        trades.iter().map(|t| t.confidence).sum::<f64>() / trades.len() as f64;

    let mut warnings = Vec::new();
    if total_risk_percent > limits.max_portfolio_risk_percent {
        warnings.push(format!(
            "Total portfolio risk {:.1}% exceeds maximum {:.1}%",
            total_risk_percent, limits.max_portfolio_risk_percent
        ));
    }

    let mut seen = HashSet::new();
    if trades.iter().any(|t| !seen.insert(t.symbol.as_str())) {
        warnings.push("Multiple positions in same symbol increases concentration risk".to_string());
    }

    debug!(
        positions = trades.len(),
        total_risk_percent = format!("{:.2}", total_risk_percent),
        warnings = warnings.len(),
        "portfolio risk aggregated"
    );

    Ok(RiskReport {
        total_risk_percent,
        total_exposure,
        position_count: trades.len(),
        avg_confidence,
        warnings,
    })
}

//! Support/resistance levels and chart pattern tags

use serde::{Deserialize, Serialize};

/// Simple chart patterns detected from recent closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternTag {
    Uptrend,
    Downtrend,
    BreakoutResistance,
    BreakdownSupport,
}

/// Detected price levels for one series.
///
/// `support` holds at most five prices in ascending order, `resistance` at
/// most five in descending order; both are deduplicated at two decimal
/// places. Empty sets mean the series was too short, not that detection
/// failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
    pub patterns: Vec<PatternTag>,
}

impl LevelSet {
    pub fn empty() -> Self {
        Self {
            support: Vec::new(),
            resistance: Vec::new(),
            patterns: Vec::new(),
        }
    }
}

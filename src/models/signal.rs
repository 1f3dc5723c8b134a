//! Directional signal data models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Buy,
    Sell,
    Hold,
}

/// Qualitative strength tag, distinct from any numeric confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalStrength {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Bullish,
    Bearish,
    Sideways,
    Unknown,
}

/// One directional signal with its rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub direction: SignalDirection,
    pub strength: SignalStrength,
    /// Which indicator rule produced the signal (e.g. "rsi", "macd").
    pub indicator: String,
    pub rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Signal {
    pub fn new(
        direction: SignalDirection,
        strength: SignalStrength,
        indicator: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            direction,
            strength,
            indicator: indicator.into(),
            rationale: rationale.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

/// Ordered signal list (insertion order = rule evaluation order) plus the
/// aggregate trend label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalBundle {
    pub signals: Vec<Signal>,
    pub trend: Trend,
}

impl SignalBundle {
    pub fn empty() -> Self {
        Self {
            signals: Vec::new(),
            trend: Trend::Unknown,
        }
    }
}

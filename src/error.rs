//! Engine error types

use std::fmt;

/// Error raised by the analytical core.
///
/// Indicator and level computations prefer degraded output (absent fields,
/// empty sets) over errors; these variants cover the cases where degrading
/// is not acceptable.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The series is too short for the requested computation.
    InsufficientData { required: usize, actual: usize },
    /// Structurally invalid input: broken candle ordering, OHLC bounds
    /// violations, non-positive price/risk fields, or a zero stop distance.
    InvalidInput(String),
    /// Batch shutdown was requested before this symbol's task started.
    Cancelled,
}

impl EngineError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Short machine-readable tag for API payloads and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "insufficient_data",
            Self::InvalidInput(_) => "invalid_input",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientData { required, actual } => write!(
                f,
                "insufficient data: {} candles required, {} provided",
                required, actual
            ),
            Self::InvalidInput(message) => write!(f, "invalid input: {}", message),
            Self::Cancelled => write!(f, "cancelled before analysis started"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Failure of a single symbol inside a batch run.
///
/// Wraps the underlying error without aborting sibling tasks; the batch
/// result map always holds one entry per requested symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct PerSymbolFailure {
    pub symbol: String,
    pub source: EngineError,
}

impl PerSymbolFailure {
    pub fn new(symbol: impl Into<String>, source: EngineError) -> Self {
        Self {
            symbol: symbol.into(),
            source,
        }
    }
}

impl fmt::Display for PerSymbolFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "analysis failed for {}: {}", self.symbol, self.source)
    }
}

impl std::error::Error for PerSymbolFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

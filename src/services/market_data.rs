//! Market data provider boundary
//!
//! The engine does not care where candles come from (live feed, simulator
//! or cache); implementations only have to satisfy this trait.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::EngineError;
use crate::models::candle::{validate_series, Candle};

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get up to `limit` most recent candles for a symbol, oldest first.
    async fn get_candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, EngineError>;

    /// Latest close for a symbol.
    async fn latest_price(&self, symbol: &str) -> Result<f64, EngineError>;
}

/// In-memory provider backed by preloaded series.
///
/// Series are validated on load, so consumers always read well-formed data.
/// Deterministic by construction; nothing is synthesized.
#[derive(Default)]
pub struct InMemoryMarketData {
    series: RwLock<HashMap<String, Vec<Candle>>>,
}

impl InMemoryMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored series for a symbol. Returns the candle count.
    pub async fn load_series(
        &self,
        symbol: impl Into<String>,
        candles: Vec<Candle>,
    ) -> Result<usize, EngineError> {
        validate_series(&candles)?;
        let symbol = symbol.into();
        let count = candles.len();
        self.series.write().await.insert(symbol.clone(), candles);
        info!(symbol = %symbol, candles = count, "series loaded");
        Ok(count)
    }

    pub async fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.series.read().await.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketData {
    async fn get_candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, EngineError> {
        let series = self.series.read().await;
        let candles = series.get(symbol).ok_or_else(|| {
            EngineError::invalid_input(format!("series not found for symbol {}", symbol))
        })?;
        let start = candles.len().saturating_sub(limit);
        Ok(candles[start..].to_vec())
    }

    async fn latest_price(&self, symbol: &str) -> Result<f64, EngineError> {
        let series = self.series.read().await;
        series
            .get(symbol)
            .and_then(|candles| candles.last())
            .map(|candle| candle.close)
            .ok_or_else(|| {
                EngineError::invalid_input(format!("series not found for symbol {}", symbol))
            })
    }
}

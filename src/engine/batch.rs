//! Concurrent multi-symbol analysis
//!
//! One independent task per symbol, bounded by a configurable concurrency
//! limit. A symbol's failure is captured in its map entry and never cancels
//! or fails sibling tasks; the result map always holds one entry per
//! requested symbol. Shutdown is honored between symbol tasks only; the
//! pure per-symbol computation performs no blocking I/O and is not
//! interrupted mid-formula.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::BatchConfig;
use crate::engine::analyzer::{Analyzer, SymbolReport};
use crate::error::{EngineError, PerSymbolFailure};
use crate::services::market_data::MarketDataProvider;

/// Complete per-symbol outcome map, one entry per requested symbol.
pub type BatchResult = BTreeMap<String, Result<SymbolReport, PerSymbolFailure>>;

pub struct BatchOrchestrator {
    analyzer: Arc<Analyzer>,
    provider: Arc<dyn MarketDataProvider>,
    concurrency: usize,
    candle_limit: usize,
    shutdown: Option<watch::Receiver<bool>>,
}

impl BatchOrchestrator {
    pub fn new(
        analyzer: Arc<Analyzer>,
        provider: Arc<dyn MarketDataProvider>,
        config: &BatchConfig,
    ) -> Self {
        Self {
            analyzer,
            provider,
            concurrency: config.max_concurrency,
            candle_limit: config.candle_limit,
            shutdown: None,
        }
    }

    /// Override the concurrency limit.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Honor an external shutdown signal between symbol tasks.
    ///
    /// Symbols whose task has not started when the signal flips report a
    /// cancelled failure; in-flight tasks run to completion.
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Analyze every symbol, collecting per-symbol results and failures.
    pub async fn run(&self, symbols: &[String]) -> BatchResult {
        info!(
            symbols = symbols.len(),
            concurrency = self.concurrency,
            "batch analysis started"
        );

        let results: Vec<(String, Result<SymbolReport, PerSymbolFailure>)> =
            stream::iter(symbols.iter().cloned())
                .map(|symbol| self.run_symbol(symbol))
                .buffer_unordered(self.concurrency.max(1))
                .collect()
                .await;

        let failures = results.iter().filter(|(_, r)| r.is_err()).count();
        info!(
            symbols = symbols.len(),
            failures, "batch analysis complete"
        );

        results.into_iter().collect()
    }

    async fn run_symbol(
        &self,
        symbol: String,
    ) -> (String, Result<SymbolReport, PerSymbolFailure>) {
        if self.is_shutting_down() {
            warn!(symbol = %symbol, "batch shutdown requested, skipping symbol");
            return (
                symbol.clone(),
                Err(PerSymbolFailure::new(symbol, EngineError::Cancelled)),
            );
        }

        let outcome = match self.provider.get_candles(&symbol, self.candle_limit).await {
            Ok(candles) => {
                debug!(symbol = %symbol, candles = candles.len(), "candles fetched");
                self.analyzer.analyze(&candles)
            }
            Err(error) => Err(error),
        };

        match outcome {
            Ok(report) => (symbol, Ok(report)),
            Err(error) => {
                warn!(symbol = %symbol, error = %error, "symbol analysis failed");
                (
                    symbol.clone(),
                    Err(PerSymbolFailure::new(symbol, error)),
                )
            }
        }
    }

    fn is_shutting_down(&self) -> bool {
        self.shutdown
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or(false)
    }
}

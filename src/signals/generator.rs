//! Rule-based signal generation from an indicator snapshot
//!
//! A fixed sequence of rules (RSI bands, moving-average alignment, MACD,
//! Bollinger breach) each contribute at most one signal; downstream
//! consumers read the bundle as an ordered rationale list. The generator is
//! a pure function of its inputs, with no randomness and no clock reads.

use tracing::debug;

use crate::models::candle::{closes, Candle};
use crate::models::indicators::IndicatorSet;
use crate::models::levels::LevelSet;
use crate::models::signal::{Signal, SignalBundle, SignalDirection, SignalStrength, Trend};

/// Closes compared by the momentum fallback of the trend label.
const MOMENTUM_WINDOW: usize = 5;
/// Relative close-mean change that counts as a directional move.
const MOMENTUM_THRESHOLD: f64 = 0.01;

pub struct SignalGenerator;

impl SignalGenerator {
    /// Evaluate all rules against the snapshot and label the trend.
    ///
    /// Indicators that are absent simply skip their rules; an empty series
    /// yields an empty bundle with an unknown trend.
    pub fn generate(
        indicators: &IndicatorSet,
        levels: &LevelSet,
        candles: &[Candle],
    ) -> SignalBundle {
        let price = match candles.last() {
            Some(candle) => candle.close,
            None => return SignalBundle::empty(),
        };

        let mut signals = Vec::new();

        if let Some(rsi) = indicators.rsi {
            if let Some(signal) = analyze_rsi(rsi) {
                signals.push(signal);
            }
        }
        if let (Some(ema_20), Some(ema_50)) = (indicators.ema_20, indicators.ema_50) {
            if let Some(signal) = analyze_ma_alignment(price, ema_20, ema_50) {
                signals.push(signal);
            }
        }
        if let Some(macd) = &indicators.macd {
            if let Some(signal) = analyze_macd(macd.macd, macd.signal) {
                signals.push(signal);
            }
        }
        if let Some(bands) = &indicators.bollinger {
            if let Some(signal) = analyze_bollinger(price, bands.lower, bands.upper) {
                signals.push(signal);
            }
        }

        let trend = aggregate_trend(indicators, candles, price);

        debug!(
            symbol = %indicators.symbol,
            signals = signals.len(),
            trend = ?trend,
            patterns = ?levels.patterns,
            "signal bundle generated"
        );

        SignalBundle { signals, trend }
    }
}

/// RSI bands: oversold below 30, overbought above 70, leaning bands on
/// either side of the neutral (45, 55) gap.
fn analyze_rsi(rsi: f64) -> Option<Signal> {
    let signal = if rsi < 30.0 {
        Signal::new(
            SignalDirection::Buy,
            SignalStrength::High,
            "rsi",
            format!("RSI oversold at {:.2}", rsi),
        )
    } else if rsi > 70.0 {
        Signal::new(
            SignalDirection::Sell,
            SignalStrength::High,
            "rsi",
            format!("RSI overbought at {:.2}", rsi),
        )
    } else if rsi >= 55.0 {
        Signal::new(
            SignalDirection::Buy,
            SignalStrength::Medium,
            "rsi",
            format!("RSI leaning bullish at {:.2}", rsi),
        )
    } else if rsi <= 45.0 {
        Signal::new(
            SignalDirection::Sell,
            SignalStrength::Medium,
            "rsi",
            format!("RSI leaning bearish at {:.2}", rsi),
        )
    } else {
        return None;
    };
    Some(signal.with_value(rsi))
}

/// Moving-average stack: price above a rising EMA pair is an uptrend
/// alignment, the mirror a downtrend alignment.
fn analyze_ma_alignment(price: f64, ema_20: f64, ema_50: f64) -> Option<Signal> {
    if price > ema_20 && ema_20 > ema_50 {
        Some(Signal::new(
            SignalDirection::Buy,
            SignalStrength::Medium,
            "ma_trend",
            format!(
                "Uptrend alignment: price {:.2} > EMA20 {:.2} > EMA50 {:.2}",
                price, ema_20, ema_50
            ),
        ))
    } else if price < ema_20 && ema_20 < ema_50 {
        Some(Signal::new(
            SignalDirection::Sell,
            SignalStrength::Medium,
            "ma_trend",
            format!(
                "Downtrend alignment: price {:.2} < EMA20 {:.2} < EMA50 {:.2}",
                price, ema_20, ema_50
            ),
        ))
    } else {
        None
    }
}

/// MACD line above its signal line and above zero is bullish momentum; the
/// sign-flipped mirror is bearish.
fn analyze_macd(macd: f64, signal: f64) -> Option<Signal> {
    if macd > signal && macd > 0.0 {
        Some(
            Signal::new(
                SignalDirection::Buy,
                SignalStrength::Medium,
                "macd",
                format!("MACD bullish: line {:.4} above signal {:.4}", macd, signal),
            )
            .with_value(macd),
        )
    } else if macd < signal && macd < 0.0 {
        Some(
            Signal::new(
                SignalDirection::Sell,
                SignalStrength::Medium,
                "macd",
                format!("MACD bearish: line {:.4} below signal {:.4}", macd, signal),
            )
            .with_value(macd),
        )
    } else {
        None
    }
}

/// Price outside the Bollinger envelope.
fn analyze_bollinger(price: f64, lower: f64, upper: f64) -> Option<Signal> {
    if price < lower {
        Some(
            Signal::new(
                SignalDirection::Buy,
                SignalStrength::High,
                "bollinger",
                format!("Oversold band: price {:.2} below lower band {:.2}", price, lower),
            )
            .with_value(price),
        )
    } else if price > upper {
        Some(
            Signal::new(
                SignalDirection::Sell,
                SignalStrength::High,
                "bollinger",
                format!("Overbought band: price {:.2} above upper band {:.2}", price, upper),
            )
            .with_value(price),
        )
    } else {
        None
    }
}

/// Aggregate trend label.
///
/// EMA alignment decides first; without alignment the mean of the last five
/// closes is compared to the five before them, and a move beyond ±1% counts
/// as directional. Absent EMAs (series too short) leave the trend unknown.
fn aggregate_trend(indicators: &IndicatorSet, candles: &[Candle], price: f64) -> Trend {
    let (ema_20, ema_50) = match (indicators.ema_20, indicators.ema_50) {
        (Some(ema_20), Some(ema_50)) => (ema_20, ema_50),
        _ => return Trend::Unknown,
    };

    if price > ema_20 && ema_20 > ema_50 {
        return Trend::Bullish;
    }
    if price < ema_20 && ema_20 < ema_50 {
        return Trend::Bearish;
    }

    close_momentum(candles)
}

fn close_momentum(candles: &[Candle]) -> Trend {
    if candles.len() < 2 * MOMENTUM_WINDOW {
        return Trend::Sideways;
    }
    let close_values = closes(candles);
    let recent = close_values[close_values.len() - MOMENTUM_WINDOW..]
        .iter()
        .sum::<f64>()
        / MOMENTUM_WINDOW as f64;
    let prior = close_values
        [close_values.len() - 2 * MOMENTUM_WINDOW..close_values.len() - MOMENTUM_WINDOW]
        .iter()
        .sum::<f64>()
        / MOMENTUM_WINDOW as f64;

    let change = (recent - prior) / prior;
    if change > MOMENTUM_THRESHOLD {
        Trend::Bullish
    } else if change < -MOMENTUM_THRESHOLD {
        Trend::Bearish
    } else {
        Trend::Sideways
    }
}

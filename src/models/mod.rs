pub mod candle;
pub mod indicators;
pub mod levels;
pub mod signal;
pub mod trade;

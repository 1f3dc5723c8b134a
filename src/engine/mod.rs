pub mod analyzer;
pub mod batch;

pub use analyzer::{Analyzer, SymbolReport};
pub use batch::BatchOrchestrator;

//! Liquidity Screening Module
//!
//! Scores instruments from order-book depth and 24h traded value, drives the
//! scorer over a whole universe, and persists the resulting table.

pub mod scan;
pub mod scorer;
pub mod table;

pub use scan::{assess_instrument, scan_liquidity, LiquidityOutcome, LiquidityScan};
pub use scorer::{score, Exclusion, LiquidityMetrics, LiquidityRecord};
pub use table::{LiquidityTable, TableError};

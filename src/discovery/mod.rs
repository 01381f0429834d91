//! Pair Discovery Module
//!
//! Screens a liquidity table for candidate pairs and ranks them by the
//! Hurst exponent of their price spread.
//!
//! # Example
//!
//! ```ignore
//! use pairscan::discovery::{scan_pairs, select_pairs, ScanConfig};
//! use pairscan::liquidity::LiquidityTable;
//! use pairscan::logging::TracingRecorder;
//! use pairscan::market::FileMarketData;
//!
//! let config = ScanConfig::default();
//! let table = LiquidityTable::load_json("liquidity_scores.json".as_ref())?;
//! let pairs = select_pairs(&table, &config.band());
//! let source = FileMarketData::new("data");
//! let report = scan_pairs(&source, &pairs, &config, &TracingRecorder::new())?;
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod results;
pub mod scanner;

pub use config::{ScanConfig, ScanWindow};
pub use error::{PairFailure, ScanError};
pub use filter::{align_tail, pair_combinations, select_pairs, select_universe, spread, LiquidityBand};
pub use results::{HurstResult, HurstTable, PairOutcome, ScanReport};
pub use scanner::{estimate_pair, scan_pairs, scan_pairs_concurrent};

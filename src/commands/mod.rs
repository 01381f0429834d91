//! CLI command handlers.
//!
//! This module contains the implementation for each CLI subcommand,
//! delegating to the liquidity and discovery pipelines.

mod export;
mod liquidity;
mod scan;

pub use export::run_export_csv;
pub use liquidity::{run_liquidity, score_universe};
pub use scan::{run_pipeline, run_scan_pairs, scan_table};

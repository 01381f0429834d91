//! CLI argument parsing using clap.
//!
//! This module defines the command-line interface for pairscan,
//! including all subcommands and their arguments.

mod config;

pub use config::CliConfigError;

use clap::{Args, Parser, Subcommand};

/// pairscan - Liquidity screening and Hurst-exponent pair scanning
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Set the verbosity level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub verbose: String,

    /// Root directory of the market data (instruments, books, tickers, candles)
    #[arg(long, global = true, env = "PAIRSCAN_DATA_DIR", default_value = "data")]
    pub data_dir: String,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Score every listed instrument's liquidity and save the table as JSON
    Liquidity {
        /// Order-book levels per side
        #[arg(long, default_value_t = 10)]
        depth: usize,
        /// Output file path for the liquidity table JSON
        #[arg(long, default_value = "liquidity_scores.json")]
        output: String,
    },

    /// Convert a liquidity table JSON into CSV
    ExportCsv {
        /// Liquidity table JSON to read
        #[arg(long, default_value = "liquidity_scores.json")]
        input: String,
        /// CSV file to write
        #[arg(long, default_value = "liquidity_scores.csv")]
        output: String,
    },

    /// Estimate the Hurst exponent of every pair in the liquidity band
    ScanPairs {
        /// Liquidity table JSON produced by `liquidity`
        #[arg(long, default_value = "liquidity_scores.json")]
        liquidity: String,
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Score liquidity, then scan pairs, in one pass
    Run {
        /// Order-book levels per side
        #[arg(long, default_value_t = 10)]
        depth: usize,
        /// Output file path for the liquidity table JSON
        #[arg(long, default_value = "liquidity_scores.json")]
        liquidity_output: String,
        #[command(flatten)]
        scan: ScanArgs,
    },
}

/// Arguments shared by the pair-scanning commands
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Exclusive lower bound of the liquidity band
    #[arg(long, default_value_t = 50.0)]
    pub band_low: f64,
    /// Exclusive upper bound of the liquidity band
    #[arg(long, default_value_t = 100.0)]
    pub band_high: f64,
    /// Largest lag (exclusive) of the Hurst regression, at least 3
    #[arg(long, default_value_t = 20)]
    pub max_lag: usize,
    /// Candle interval (1m, 5m, 1h, 4h, 1d, 1w, ...)
    #[arg(long, default_value = "1d")]
    pub interval: String,
    /// First day of the historical window (YYYY-MM-DD)
    #[arg(long, default_value = "2023-01-01")]
    pub start_date: String,
    /// Last day of the historical window (YYYY-MM-DD, or "now")
    #[arg(long, default_value = "2023-12-31")]
    pub end_date: String,
    /// Pairs estimated in parallel
    #[arg(long, env = "PAIRSCAN_WORKERS", default_value_t = 1)]
    pub workers: usize,
    /// Output file path for the pair results JSON
    #[arg(long, default_value = "hurst_results.json")]
    pub output: String,
    /// Per-pair CSV log, appended as each pair completes
    #[arg(long, default_value = "pair_results.csv")]
    pub results_csv: String,
}

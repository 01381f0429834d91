//! Error types for the discovery module

use crate::liquidity::TableError;
use crate::logging::RecordError;
use crate::market::{DateRangeError, MarketDataError};
use crate::math::HurstError;
use thiserror::Error;

/// Fatal errors: raised before any pair is processed, or when final
/// persistence fails
#[derive(Error, Debug)]
pub enum ScanError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Nothing to scan
    #[error("Instrument universe is empty: {0}")]
    EmptyUniverse(String),

    /// Malformed or inverted date window
    #[error("Invalid date range: {0}")]
    DateRange(#[from] DateRangeError),

    /// Instrument listing failed
    #[error("Market data error: {0}")]
    Market(#[from] MarketDataError),

    /// Liquidity table could not be read or written
    #[error("Liquidity table error: {0}")]
    Table(#[from] TableError),

    /// Result recorder could not be opened
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single pair produced no Hurst estimate.
///
/// Local to the pair: the scan records it and moves on.
#[derive(Error, Debug)]
pub enum PairFailure {
    #[error("data unavailable: {0}")]
    DataUnavailable(#[from] MarketDataError),

    #[error("{0}")]
    Estimate(#[from] HurstError),

    /// The worker estimating the pair panicked or was cancelled
    #[error("estimation task failed: {0}")]
    TaskFailed(String),
}

impl PairFailure {
    /// Short machine-readable status used in result logs
    pub fn kind(&self) -> &'static str {
        match self {
            PairFailure::DataUnavailable(_) => "data_unavailable",
            PairFailure::Estimate(HurstError::InsufficientSamples { .. }) => "insufficient_samples",
            PairFailure::Estimate(HurstError::InvalidMaxLag(_)) => "invalid_max_lag",
            PairFailure::Estimate(HurstError::DegenerateLag { .. })
            | PairFailure::Estimate(HurstError::DegenerateFit { .. }) => "degenerate",
            PairFailure::TaskFailed(_) => "task_failed",
        }
    }
}

//! Statistical primitives for spread analysis.
//!
//! Provides the Hurst exponent estimator used to rank pair spreads by
//! persistence, plus the small regression helpers it is built on.

pub mod hurst;

pub use hurst::{hurst_exponent, HurstError, DEFAULT_MAX_LAG, MIN_MAX_LAG};

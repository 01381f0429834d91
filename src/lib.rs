pub mod cli;
pub mod commands;
pub mod discovery;
pub mod liquidity;
pub mod logging;
pub mod market;
pub mod math;
pub mod types;

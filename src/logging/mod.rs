//! Logging and Result Recording Module
//!
//! Provides backends for recording pair outcomes as they are computed:
//! - `PairRecorder` trait - Pluggable recorder interface
//! - `CsvRecorder` - Append-only CSV file recorder
//! - `TracingRecorder` - Structured log lines
//!
//! plus `ProgressLog` for throttled progress over long loops.

pub mod csv_recorder;
pub mod recorder;
pub mod throttle;
pub mod tracing_recorder;

// Re-exports for convenience
pub use csv_recorder::CsvRecorder;
pub use recorder::{MultiRecorder, PairRecorder, RecordError};
pub use throttle::{LogThrottle, ProgressLog};
pub use tracing_recorder::TracingRecorder;

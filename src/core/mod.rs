//! Core engine: batch outcomes, the retention evaluator, and the
//! protection engine facade

pub mod batch;
pub mod engine;
pub mod retention;

pub use batch::{BatchOutcome, SweepOutcome};
pub use engine::{ExportRow, ProtectionEngine};
pub use retention::{RetentionPolicy, DEFAULT_RETENTION_DAYS};

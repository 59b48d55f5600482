//! High-level analysis workflow
//!
//! Rep counter facades and the report they produce.

pub mod counter;
pub mod report;

pub use counter::{analyze, BenchPressCounter, CounterConfig, Exercise, RepCounter, SquatCounter};
pub use report::{ExerciseReport, RepRecord, RepReport};

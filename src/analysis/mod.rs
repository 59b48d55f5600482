//! Trajectory analysis and repetition segmentation
//!
//! This module turns per-frame pose detections into repetition boundaries:
//! - Trajectory extraction of a tracked body point
//! - Moving-average smoothing
//! - High/low state-machine segmentation

pub mod trajectory;
pub mod smoothing;
pub mod rep_segmentation;

pub use trajectory::{TrackedPoint, Trajectory, TrajectorySample, MIN_TRAJECTORY_SAMPLES};
pub use smoothing::{MovingAverage, SmoothedPoint, SmoothedSignal};
pub use rep_segmentation::{RepSegment, RepSegmenter};

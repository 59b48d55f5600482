//! Pose input model
//!
//! Typed per-frame landmark detections consumed by the analysis pipeline.

pub mod landmarks;
pub mod types;

pub use types::{Landmark, PoseFrame, PoseSequence};

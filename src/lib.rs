//! # Rep Analyzer
//!
//! Counts squat and bench press repetitions from per-frame body-pose
//! landmarks and checks each repetition's form at its lowest point.
//!
//! ## Overview
//!
//! Input is a sequence of frames, each either holding the 33 normalized
//! MediaPipe pose landmarks or marked absent. A tracked point's vertical
//! trajectory is smoothed, segmented into repetitions by a three-phase
//! state machine, and every repetition is scored by an exercise-specific
//! validator.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rep_analyzer::{PoseSequence, SquatCounter};
//!
//! let sequence = PoseSequence::load(std::path::Path::new("poses.json"))?;
//! let report = SquatCounter::new().count(&sequence);
//!
//! for rep in &report.reps {
//!     println!(
//!         "rep {} bottom at frame {}: {}",
//!         rep.segment.rep_number,
//!         rep.segment.lowest_point_frame,
//!         rep.validation.validation_status
//!     );
//! }
//! # Ok::<(), rep_analyzer::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`pose`]: Landmark, frame and sequence types
//! - [`analysis`]: Trajectory extraction, smoothing and rep segmentation
//! - [`validation`]: Per-exercise form validators
//! - [`workflow`]: Rep counter facades and reports
//! - [`feedback`]: Session summaries and coaching prompts
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │    Pose     │───▶│ Trajectory  │───▶│   Moving    │───▶│    Rep      │
//! │  Sequence   │    │ Extraction  │    │   Average   │    │ Segmentation│
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                                                 │
//!                                                                 ▼
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Coach     │◀───│   Session   │◀───│ Rep Report  │◀───│    Form     │
//! │   Prompt    │    │   Summary   │    │   (JSON)    │    │ Validation  │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//! ```

pub mod pose;
pub mod analysis;
pub mod validation;
pub mod workflow;
pub mod feedback;
pub mod app;

// Re-export commonly used types
pub use pose::{Landmark, PoseFrame, PoseSequence};
pub use analysis::{RepSegment, RepSegmenter};
pub use validation::{BenchPressValidation, SquatValidation, ValidationStatus};
pub use workflow::{analyze, BenchPressCounter, Exercise, ExerciseReport, RepReport, SquatCounter};
pub use feedback::{CoachPrompt, SessionSummary};

/// Result type alias for the rep analyzer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the rep analyzer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

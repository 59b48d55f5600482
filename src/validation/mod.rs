//! Form validation at a repetition's lowest point
//!
//! Each exercise scores one frame's landmarks against geometric
//! depth/width criteria. Frames that cannot be scored produce an
//! `invalid` result with null metrics instead of an error.

pub mod squat;
pub mod bench_press;

pub use squat::{SquatValidation, SquatValidator};
pub use bench_press::{BenchPressValidation, BenchPressValidator};

use crate::pose::{Landmark, PoseFrame, PoseSequence};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::warn;

/// Overall verdict for a repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Every criterion met
    Valid,
    /// Some but not all criteria met
    PartiallyValid,
    /// No criterion met, or the frame could not be scored
    Invalid,
}

impl ValidationStatus {
    /// Verdict from a set of pass/fail criteria
    pub fn from_checks(checks: &[bool]) -> Self {
        let passed = checks.iter().filter(|&&c| c).count();
        if !checks.is_empty() && passed == checks.len() {
            ValidationStatus::Valid
        } else if passed > 0 {
            ValidationStatus::PartiallyValid
        } else {
            ValidationStatus::Invalid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Valid => "valid",
            ValidationStatus::PartiallyValid => "partially_valid",
            ValidationStatus::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common view over exercise-specific validation records
pub trait RepValidation {
    fn status(&self) -> ValidationStatus;
    fn depth_valid(&self) -> bool;
}

/// Scores a single frame for one exercise
pub trait FormValidator {
    /// Exercise-specific result record
    type Output: RepValidation + Clone + Serialize + DeserializeOwned;

    /// Landmark count a frame must carry to be scored
    fn required_landmarks(&self) -> usize;

    /// Result for a frame that cannot be scored
    fn unscorable(&self) -> Self::Output;

    /// Score a detection carrying at least `required_landmarks()` points
    fn score(&self, landmarks: &[Landmark]) -> Self::Output;

    /// Score a frame, absorbing absent or short detections
    fn validate_frame(&self, frame: &PoseFrame) -> Self::Output {
        let required = self.required_landmarks();
        match frame.landmarks() {
            None => {
                warn!("No pose detected at lowest point; marking rep invalid");
                self.unscorable()
            }
            Some(landmarks) if landmarks.len() < required => {
                warn!(
                    found = landmarks.len(),
                    required,
                    "Frame has too few landmarks; marking rep invalid"
                );
                self.unscorable()
            }
            Some(landmarks) => self.score(landmarks),
        }
    }

    /// Score the frame at `frame_index`, absorbing out-of-range indices
    fn validate_at(&self, sequence: &PoseSequence, frame_index: usize) -> Self::Output {
        match sequence.frame(frame_index) {
            Some(frame) => self.validate_frame(frame),
            None => {
                warn!(
                    frame_index,
                    frames = sequence.len(),
                    "Frame index out of range; marking rep invalid"
                );
                self.unscorable()
            }
        }
    }
}

/// Mean of two values
pub(crate) fn midpoint(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

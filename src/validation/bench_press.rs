//! Bench Press Form Validation
//!
//! Single criterion at the lowest point: mean wrist y must reach at least
//! `wrist_height_ratio` of the chest proxy (mean shoulder y). With the
//! default ratio of 0.95 the wrists may stop up to 5% short of chest level.

use super::{midpoint, FormValidator, RepValidation, ValidationStatus};
use crate::pose::landmarks::{LEFT_SHOULDER, LEFT_WRIST, RIGHT_SHOULDER, RIGHT_WRIST};
use crate::pose::Landmark;
use serde::{Deserialize, Serialize};

/// Landmarks a frame must carry (highest index used is the right wrist)
pub const BENCH_PRESS_MIN_LANDMARKS: usize = 17;

/// Required wrist height as a fraction of chest height
pub const DEFAULT_WRIST_HEIGHT_RATIO: f64 = 0.95;

/// Bench press measurements and verdict at one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchPressValidation {
    pub validation_status: ValidationStatus,
    pub depth_valid: bool,
    /// Mean wrist y
    pub wrist_height: Option<f64>,
    /// Mean shoulder y, used as the chest level
    pub chest_height: Option<f64>,
    pub required_wrist_height: Option<f64>,
    /// Wrist offset from chest as a percentage of chest height
    pub depth_percentage: Option<f64>,
    /// Shortfall in depth (0 when depth is valid)
    pub depth_missed_by: Option<f64>,
}

impl BenchPressValidation {
    /// Invalid result with every metric null
    pub fn unscorable() -> Self {
        Self {
            validation_status: ValidationStatus::Invalid,
            depth_valid: false,
            wrist_height: None,
            chest_height: None,
            required_wrist_height: None,
            depth_percentage: None,
            depth_missed_by: None,
        }
    }
}

impl RepValidation for BenchPressValidation {
    fn status(&self) -> ValidationStatus {
        self.validation_status
    }

    fn depth_valid(&self) -> bool {
        self.depth_valid
    }
}

/// Bench press depth validator
#[derive(Debug, Clone, Copy)]
pub struct BenchPressValidator {
    pub wrist_height_ratio: f64,
}

impl BenchPressValidator {
    pub fn new() -> Self {
        Self {
            wrist_height_ratio: DEFAULT_WRIST_HEIGHT_RATIO,
        }
    }

    pub fn with_ratio(wrist_height_ratio: f64) -> Self {
        Self { wrist_height_ratio }
    }
}

impl Default for BenchPressValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FormValidator for BenchPressValidator {
    type Output = BenchPressValidation;

    fn required_landmarks(&self) -> usize {
        BENCH_PRESS_MIN_LANDMARKS
    }

    fn unscorable(&self) -> BenchPressValidation {
        BenchPressValidation::unscorable()
    }

    fn score(&self, landmarks: &[Landmark]) -> BenchPressValidation {
        let wrist_height = midpoint(landmarks[LEFT_WRIST].y, landmarks[RIGHT_WRIST].y);
        let chest_height = midpoint(landmarks[LEFT_SHOULDER].y, landmarks[RIGHT_SHOULDER].y);

        let required_wrist_height = chest_height * self.wrist_height_ratio;
        let depth_valid = wrist_height >= required_wrist_height;

        let depth_percentage = if chest_height > 0.0 {
            (wrist_height - chest_height) / chest_height * 100.0
        } else {
            0.0
        };

        let depth_missed_by = if depth_valid {
            0.0
        } else {
            (required_wrist_height - wrist_height).abs()
        };

        BenchPressValidation {
            validation_status: ValidationStatus::from_checks(&[depth_valid]),
            depth_valid,
            wrist_height: Some(wrist_height),
            chest_height: Some(chest_height),
            required_wrist_height: Some(required_wrist_height),
            depth_percentage: Some(depth_percentage),
            depth_missed_by: Some(depth_missed_by),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Landmark, PoseFrame, PoseSequence};

    const EPS: f64 = 1e-9;

    fn bench_frame(wrist_y: f64, shoulder_y: f64, count: usize) -> PoseFrame {
        let mut landmarks = vec![Landmark::at(0.5, 0.5); count];
        landmarks[LEFT_WRIST].y = wrist_y;
        landmarks[RIGHT_WRIST].y = wrist_y;
        landmarks[LEFT_SHOULDER].y = shoulder_y;
        landmarks[RIGHT_SHOULDER].y = shoulder_y;
        PoseFrame::Detected(landmarks)
    }

    #[test]
    fn test_wrists_above_required_height_fail() {
        // required = 0.80 * 0.95 = 0.76; 0.70 >= 0.76 is false
        let result = BenchPressValidator::new().validate_frame(&bench_frame(0.70, 0.80, 33));

        assert!((result.required_wrist_height.unwrap() - 0.76).abs() < EPS);
        assert!(!result.depth_valid);
        assert_eq!(result.validation_status, ValidationStatus::Invalid);
        assert!((result.depth_missed_by.unwrap() - 0.06).abs() < EPS);
        assert!((result.depth_percentage.unwrap() + 12.5).abs() < EPS);
    }

    #[test]
    fn test_wrists_at_chest_pass() {
        let result = BenchPressValidator::new().validate_frame(&bench_frame(0.80, 0.80, 33));
        assert!(result.depth_valid);
        assert_eq!(result.validation_status, ValidationStatus::Valid);
        assert_eq!(result.depth_missed_by, Some(0.0));
        assert!(result.depth_percentage.unwrap().abs() < EPS);
    }

    #[test]
    fn test_wrists_within_five_percent_pass() {
        let result = BenchPressValidator::new().validate_frame(&bench_frame(0.77, 0.80, 33));
        assert!(result.depth_valid);
        assert!(result.depth_percentage.unwrap() < 0.0);
    }

    #[test]
    fn test_minimum_landmark_count() {
        let validator = BenchPressValidator::new();
        let exact = validator.validate_frame(&bench_frame(0.80, 0.80, 17));
        assert_eq!(exact.validation_status, ValidationStatus::Valid);

        let short = PoseFrame::Detected(vec![Landmark::at(0.5, 0.5); 16]);
        assert_eq!(validator.validate_frame(&short), BenchPressValidation::unscorable());
    }

    #[test]
    fn test_zero_chest_height() {
        let result = BenchPressValidator::new().validate_frame(&bench_frame(0.0, 0.0, 33));
        assert_eq!(result.depth_percentage, Some(0.0));
        assert!(result.depth_valid);
    }

    #[test]
    fn test_absent_and_out_of_range() {
        let validator = BenchPressValidator::new();
        let sequence = PoseSequence::new(vec![PoseFrame::Absent]);
        assert_eq!(validator.validate_at(&sequence, 0), BenchPressValidation::unscorable());
        assert_eq!(validator.validate_at(&sequence, 3), BenchPressValidation::unscorable());
    }

    #[test]
    fn test_custom_ratio() {
        let strict = BenchPressValidator::with_ratio(1.0);
        let result = strict.validate_frame(&bench_frame(0.79, 0.80, 33));
        assert!(!result.depth_valid);
    }
}

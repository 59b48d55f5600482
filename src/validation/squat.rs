//! Squat Form Validation
//!
//! At the lowest point of a squat:
//! - Depth: hips at or below knee level (hip y >= knee y, image y grows downward)
//! - Stance: knees at least shoulder-width apart, within a tolerance

use super::{midpoint, FormValidator, RepValidation, ValidationStatus};
use crate::pose::landmarks::{
    LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER,
};
use crate::pose::Landmark;
use serde::{Deserialize, Serialize};

/// Landmarks a frame must carry (highest index used is the right knee)
pub const SQUAT_MIN_LANDMARKS: usize = 27;

/// Knees may be this fraction narrower than the shoulders and still pass
pub const DEFAULT_KNEE_WIDTH_TOLERANCE: f64 = 0.10;

/// Squat measurements and verdict at one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SquatValidation {
    pub validation_status: ValidationStatus,
    pub depth_valid: bool,
    pub knee_width_valid: bool,
    /// Mean hip y
    pub hip_height: Option<f64>,
    /// Mean knee y
    pub knee_height: Option<f64>,
    /// `hip_height - knee_height`; >= 0 means at or below parallel
    pub depth_difference: Option<f64>,
    pub knee_width: Option<f64>,
    pub shoulder_width: Option<f64>,
    /// `knee_width - shoulder_width`
    pub width_difference: Option<f64>,
    pub min_required_knee_width: Option<f64>,
    /// Shortfall in depth (0 when depth is valid)
    pub depth_missed_by: Option<f64>,
    /// Shortfall in knee width (0 when width is valid)
    pub width_missed_by: Option<f64>,
}

impl SquatValidation {
    /// Invalid result with every metric null
    pub fn unscorable() -> Self {
        Self {
            validation_status: ValidationStatus::Invalid,
            depth_valid: false,
            knee_width_valid: false,
            hip_height: None,
            knee_height: None,
            depth_difference: None,
            knee_width: None,
            shoulder_width: None,
            width_difference: None,
            min_required_knee_width: None,
            depth_missed_by: None,
            width_missed_by: None,
        }
    }
}

impl RepValidation for SquatValidation {
    fn status(&self) -> ValidationStatus {
        self.validation_status
    }

    fn depth_valid(&self) -> bool {
        self.depth_valid
    }
}

/// Squat depth and stance validator
#[derive(Debug, Clone, Copy)]
pub struct SquatValidator {
    /// Allowed fraction by which knee width may fall short of shoulder width
    pub knee_width_tolerance: f64,
}

impl SquatValidator {
    pub fn new() -> Self {
        Self {
            knee_width_tolerance: DEFAULT_KNEE_WIDTH_TOLERANCE,
        }
    }

    pub fn with_tolerance(knee_width_tolerance: f64) -> Self {
        Self { knee_width_tolerance }
    }
}

impl Default for SquatValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FormValidator for SquatValidator {
    type Output = SquatValidation;

    fn required_landmarks(&self) -> usize {
        SQUAT_MIN_LANDMARKS
    }

    fn unscorable(&self) -> SquatValidation {
        SquatValidation::unscorable()
    }

    fn score(&self, landmarks: &[Landmark]) -> SquatValidation {
        let hip_height = midpoint(landmarks[LEFT_HIP].y, landmarks[RIGHT_HIP].y);
        let knee_height = midpoint(landmarks[LEFT_KNEE].y, landmarks[RIGHT_KNEE].y);
        let depth_difference = hip_height - knee_height;
        let depth_valid = depth_difference >= 0.0;

        let knee_width = (landmarks[LEFT_KNEE].x - landmarks[RIGHT_KNEE].x).abs();
        let shoulder_width = (landmarks[LEFT_SHOULDER].x - landmarks[RIGHT_SHOULDER].x).abs();
        let min_required_knee_width = shoulder_width * (1.0 - self.knee_width_tolerance);
        let knee_width_valid = knee_width >= min_required_knee_width;

        let depth_missed_by = if depth_valid { 0.0 } else { depth_difference.abs() };
        let width_missed_by = if knee_width_valid {
            0.0
        } else {
            (knee_width - min_required_knee_width).abs()
        };

        SquatValidation {
            validation_status: ValidationStatus::from_checks(&[depth_valid, knee_width_valid]),
            depth_valid,
            knee_width_valid,
            hip_height: Some(hip_height),
            knee_height: Some(knee_height),
            depth_difference: Some(depth_difference),
            knee_width: Some(knee_width),
            shoulder_width: Some(shoulder_width),
            width_difference: Some(knee_width - shoulder_width),
            min_required_knee_width: Some(min_required_knee_width),
            depth_missed_by: Some(depth_missed_by),
            width_missed_by: Some(width_missed_by),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Landmark, PoseFrame, PoseSequence};

    const EPS: f64 = 1e-9;

    fn squat_frame(hip_y: f64, knee_y: f64, knee_x: (f64, f64), shoulder_x: (f64, f64)) -> PoseFrame {
        let mut landmarks = vec![Landmark::at(0.5, 0.5); 33];
        landmarks[LEFT_HIP].y = hip_y;
        landmarks[RIGHT_HIP].y = hip_y;
        landmarks[LEFT_KNEE] = Landmark::at(knee_x.0, knee_y);
        landmarks[RIGHT_KNEE] = Landmark::at(knee_x.1, knee_y);
        landmarks[LEFT_SHOULDER].x = shoulder_x.0;
        landmarks[RIGHT_SHOULDER].x = shoulder_x.1;
        PoseFrame::Detected(landmarks)
    }

    #[test]
    fn test_valid_deep_wide_squat() {
        let frame = squat_frame(0.90, 0.88, (0.40, 0.60), (0.42, 0.58));
        let result = SquatValidator::new().validate_frame(&frame);

        assert!(result.depth_valid);
        assert!(result.knee_width_valid);
        assert_eq!(result.validation_status, ValidationStatus::Valid);
        assert!((result.knee_width.unwrap() - 0.20).abs() < EPS);
        assert!((result.shoulder_width.unwrap() - 0.16).abs() < EPS);
        assert!((result.min_required_knee_width.unwrap() - 0.144).abs() < EPS);
        assert!((result.depth_difference.unwrap() - 0.02).abs() < EPS);
        assert_eq!(result.depth_missed_by, Some(0.0));
        assert_eq!(result.width_missed_by, Some(0.0));
    }

    #[test]
    fn test_shallow_squat_is_partially_valid() {
        let frame = squat_frame(0.82, 0.88, (0.40, 0.60), (0.42, 0.58));
        let result = SquatValidator::new().validate_frame(&frame);

        assert!(!result.depth_valid);
        assert!(result.knee_width_valid);
        assert_eq!(result.validation_status, ValidationStatus::PartiallyValid);
        assert!((result.depth_missed_by.unwrap() - 0.06).abs() < EPS);
    }

    #[test]
    fn test_narrow_knees_is_partially_valid() {
        let frame = squat_frame(0.90, 0.88, (0.45, 0.55), (0.40, 0.60));
        let result = SquatValidator::new().validate_frame(&frame);

        assert!(result.depth_valid);
        assert!(!result.knee_width_valid);
        assert_eq!(result.validation_status, ValidationStatus::PartiallyValid);
        // min required = 0.20 * 0.9 = 0.18, knees 0.10 apart
        assert!((result.width_missed_by.unwrap() - 0.08).abs() < EPS);
        assert!((result.width_difference.unwrap() + 0.10).abs() < EPS);
    }

    #[test]
    fn test_shallow_and_narrow_is_invalid() {
        let frame = squat_frame(0.80, 0.88, (0.45, 0.55), (0.40, 0.60));
        let result = SquatValidator::new().validate_frame(&frame);
        assert_eq!(result.validation_status, ValidationStatus::Invalid);
        assert!(result.hip_height.is_some());
    }

    #[test]
    fn test_hips_level_with_knees_counts_as_depth() {
        let frame = squat_frame(0.88, 0.88, (0.40, 0.60), (0.42, 0.58));
        let result = SquatValidator::new().validate_frame(&frame);
        assert!(result.depth_valid);
    }

    #[test]
    fn test_knee_width_within_tolerance() {
        // Knees 0.17 apart, shoulders 0.18: 5.6% narrower, inside 10%
        let frame = squat_frame(0.90, 0.88, (0.415, 0.585), (0.41, 0.59));
        let result = SquatValidator::new().validate_frame(&frame);
        assert!(result.knee_width_valid);

        let strict = SquatValidator::with_tolerance(0.0).validate_frame(&frame);
        assert!(!strict.knee_width_valid);
    }

    #[test]
    fn test_too_few_landmarks() {
        let frame = PoseFrame::Detected(vec![Landmark::at(0.5, 0.5); 26]);
        let result = SquatValidator::new().validate_frame(&frame);
        assert_eq!(result, SquatValidation::unscorable());
    }

    #[test]
    fn test_absent_frame() {
        let result = SquatValidator::new().validate_frame(&PoseFrame::Absent);
        assert_eq!(result.validation_status, ValidationStatus::Invalid);
        assert!(result.hip_height.is_none());
        assert!(result.depth_missed_by.is_none());
    }

    #[test]
    fn test_out_of_range_frame_index() {
        let sequence = PoseSequence::new(vec![squat_frame(0.90, 0.88, (0.40, 0.60), (0.42, 0.58))]);
        let validator = SquatValidator::new();
        assert_eq!(validator.validate_at(&sequence, 0).validation_status, ValidationStatus::Valid);
        assert_eq!(validator.validate_at(&sequence, 5), SquatValidation::unscorable());
    }

    #[test]
    fn test_unscorable_serializes_nulls() {
        let json = serde_json::to_value(SquatValidation::unscorable()).unwrap();
        assert_eq!(json["validation_status"], "invalid");
        assert!(json["hip_height"].is_null());
        assert!(json["width_missed_by"].is_null());
        assert_eq!(json["depth_valid"], false);
    }
}

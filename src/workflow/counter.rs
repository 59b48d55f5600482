//! Rep Counter Facades
//!
//! Wires extraction, smoothing, segmentation and validation into a single
//! call per exercise. Analysis never fails: insufficient signal yields an
//! empty report and unscorable frames yield invalid records.

use crate::analysis::{MovingAverage, RepSegmenter, TrackedPoint, Trajectory};
use crate::analysis::smoothing::DEFAULT_WINDOW;
use crate::analysis::rep_segmentation::{BENCH_PRESS_MOVEMENT_THRESHOLD, SQUAT_MOVEMENT_THRESHOLD};
use crate::app::config::Config;
use crate::pose::PoseSequence;
use crate::validation::{BenchPressValidator, FormValidator, SquatValidator};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::report::{ExerciseReport, RepRecord, RepReport};

/// Supported exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    Squat,
    BenchPress,
}

impl Exercise {
    /// Point whose vertical trajectory drives segmentation
    pub fn tracked_point(&self) -> TrackedPoint {
        match self {
            Exercise::Squat => TrackedPoint::HEAD,
            Exercise::BenchPress => TrackedPoint::WRISTS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Exercise::Squat => "squat",
            Exercise::BenchPress => "bench press",
        }
    }
}

/// Signal-processing parameters for a counter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterConfig {
    /// Minimum smoothed delta that registers a direction change
    pub movement_threshold: f64,
    /// Moving-average window (samples); even values round up to the next odd width
    pub smoothing_window: usize,
}

impl CounterConfig {
    pub fn for_exercise(exercise: Exercise) -> Self {
        let movement_threshold = match exercise {
            Exercise::Squat => SQUAT_MOVEMENT_THRESHOLD,
            Exercise::BenchPress => BENCH_PRESS_MOVEMENT_THRESHOLD,
        };
        Self {
            movement_threshold,
            smoothing_window: DEFAULT_WINDOW,
        }
    }
}

/// Extract -> smooth -> segment -> validate pipeline
#[derive(Debug, Clone)]
pub struct RepCounter<V> {
    exercise: Exercise,
    smoother: MovingAverage,
    segmenter: RepSegmenter,
    validator: V,
}

/// Squat counter (head tracking, depth + knee-width validation)
pub type SquatCounter = RepCounter<SquatValidator>;

/// Bench press counter (wrist tracking, depth validation)
pub type BenchPressCounter = RepCounter<BenchPressValidator>;

impl<V: FormValidator> RepCounter<V> {
    /// Assemble a counter from its parts
    pub fn with_config(exercise: Exercise, config: CounterConfig, validator: V) -> Self {
        Self {
            exercise,
            smoother: MovingAverage::with_window(config.smoothing_window),
            segmenter: RepSegmenter::new(config.movement_threshold),
            validator,
        }
    }

    pub fn exercise(&self) -> Exercise {
        self.exercise
    }

    /// Count and validate repetitions in a pose sequence
    pub fn count(&self, sequence: &PoseSequence) -> RepReport<V::Output> {
        let trajectory = Trajectory::extract(sequence, self.exercise.tracked_point());
        if !trajectory.is_sufficient() {
            debug!(
                exercise = self.exercise.name(),
                frames = sequence.len(),
                samples = trajectory.len(),
                "Too few usable samples; returning empty report"
            );
            return RepReport::empty();
        }

        let signal = self.smoother.smooth(&trajectory);
        let segments = self.segmenter.segment(&signal);

        let reps: Vec<_> = segments
            .into_iter()
            .map(|segment| RepRecord {
                validation: self.validator.validate_at(sequence, segment.lowest_point_frame),
                segment,
            })
            .collect();

        let report = RepReport::from_records(reps);
        info!(
            exercise = self.exercise.name(),
            frames = sequence.len(),
            samples = trajectory.len(),
            reps = report.rep_count,
            "Analysis complete"
        );
        report
    }
}

impl SquatCounter {
    /// Counter with default squat parameters
    pub fn new() -> Self {
        Self::with_config(
            Exercise::Squat,
            CounterConfig::for_exercise(Exercise::Squat),
            SquatValidator::new(),
        )
    }
}

impl Default for SquatCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchPressCounter {
    /// Counter with default bench press parameters
    pub fn new() -> Self {
        Self::with_config(
            Exercise::BenchPress,
            CounterConfig::for_exercise(Exercise::BenchPress),
            BenchPressValidator::new(),
        )
    }
}

impl Default for BenchPressCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the counter for `exercise` using parameters from `config`
pub fn analyze(exercise: Exercise, sequence: &PoseSequence, config: &Config) -> ExerciseReport {
    let counter_config = config.counter_config(exercise);
    match exercise {
        Exercise::Squat => {
            let validator = SquatValidator::with_tolerance(config.squat.knee_width_tolerance);
            ExerciseReport::Squat(SquatCounter::with_config(exercise, counter_config, validator).count(sequence))
        }
        Exercise::BenchPress => {
            let validator = BenchPressValidator::with_ratio(config.bench_press.wrist_height_ratio);
            ExerciseReport::BenchPress(
                BenchPressCounter::with_config(exercise, counter_config, validator).count(sequence),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::landmarks::{LEFT_WRIST, NOSE, RIGHT_WRIST};
    use crate::pose::{Landmark, PoseFrame};
    use crate::validation::ValidationStatus;

    fn head_frame(y: f64) -> PoseFrame {
        let mut landmarks = vec![Landmark::at(0.5, 0.5); 33];
        landmarks[NOSE].y = y;
        PoseFrame::Detected(landmarks)
    }

    fn wrist_frame(y: f64) -> PoseFrame {
        let mut landmarks = vec![Landmark::at(0.5, 0.5); 33];
        landmarks[LEFT_WRIST].y = y;
        landmarks[RIGHT_WRIST].y = y;
        PoseFrame::Detected(landmarks)
    }

    #[test]
    fn test_exercise_tracked_points() {
        assert_eq!(Exercise::Squat.tracked_point(), TrackedPoint::Single(NOSE));
        assert_eq!(Exercise::BenchPress.tracked_point(), TrackedPoint::Pair(LEFT_WRIST, RIGHT_WRIST));
    }

    #[test]
    fn test_counter_config_presets() {
        assert_eq!(CounterConfig::for_exercise(Exercise::Squat).movement_threshold, 0.02);
        assert_eq!(CounterConfig::for_exercise(Exercise::BenchPress).movement_threshold, 0.01);
        assert_eq!(CounterConfig::for_exercise(Exercise::Squat).smoothing_window, 3);
    }

    #[test]
    fn test_even_smoothing_window_is_centred() {
        let config = CounterConfig {
            movement_threshold: SQUAT_MOVEMENT_THRESHOLD,
            smoothing_window: 4,
        };
        let counter = SquatCounter::with_config(Exercise::Squat, config, SquatValidator::new());
        assert_eq!(counter.smoother.window(), 5);
    }

    #[test]
    fn test_squat_counter_single_rep() {
        let sequence: PoseSequence = [0.3, 0.3, 0.3, 0.6, 0.8, 0.6, 0.3, 0.3, 0.3, 0.3]
            .iter()
            .map(|&y| head_frame(y))
            .collect();

        let report = SquatCounter::new().count(&sequence);
        assert_eq!(report.rep_count, 1);
        assert_eq!(report.reps[0].segment.lowest_point_frame, 4);
    }

    #[test]
    fn test_too_few_samples() {
        let sequence = PoseSequence::new(vec![head_frame(0.3), PoseFrame::Absent, head_frame(0.8)]);
        let report = SquatCounter::new().count(&sequence);
        assert_eq!(report, RepReport::empty());
    }

    #[test]
    fn test_bench_counter_smaller_threshold() {
        let values = [0.50, 0.50, 0.50, 0.54, 0.58, 0.54, 0.50, 0.50, 0.50, 0.50];
        let sequence: PoseSequence = values.iter().map(|&y| wrist_frame(y)).collect();

        let report = BenchPressCounter::new().count(&sequence);
        assert_eq!(report.rep_count, 1);
        assert_eq!(report.reps[0].segment.end_frame, 5);
        assert_eq!(report.reps[0].segment.lowest_point_frame, 4);
        // Shoulders sit at 0.5, so wrists at 0.58 reach past chest level
        assert_eq!(report.reps[0].validation.validation_status, ValidationStatus::Valid);
    }

    #[test]
    fn test_analyze_dispatch() {
        let sequence: PoseSequence = [0.3, 0.3, 0.3, 0.6, 0.8, 0.6, 0.3, 0.3, 0.3, 0.3]
            .iter()
            .map(|&y| head_frame(y))
            .collect();

        let report = analyze(Exercise::Squat, &sequence, &Config::default());
        assert_eq!(report.exercise(), Exercise::Squat);
        assert_eq!(report.rep_count(), 1);
    }
}

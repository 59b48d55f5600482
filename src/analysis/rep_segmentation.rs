//! Repetition Segmentation
//!
//! Turns a smoothed vertical trajectory into discrete repetitions with a
//! three-state machine (`Unknown -> High <-> Low`). Edges are detected on
//! the smoothed signal; the lowest point of each rep is located on the raw
//! signal so smoothing cannot shift the reported extremum.
//!
//! Larger values are physically lower (image y grows downward), so a
//! descending edge is a rise in value and an ascending edge is a drop.

use super::smoothing::SmoothedSignal;
use super::trajectory::TrajectorySample;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Movement threshold for squat head tracking
pub const SQUAT_MOVEMENT_THRESHOLD: f64 = 0.02;

/// Movement threshold for bench-press wrist tracking
pub const BENCH_PRESS_MOVEMENT_THRESHOLD: f64 = 0.01;

/// Boundaries of one completed repetition (frame numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepSegment {
    /// 1-based, sequential
    pub rep_number: usize,
    pub start_frame: usize,
    pub end_frame: usize,
    /// Frame with the maximal raw tracked value during the low phase
    pub lowest_point_frame: usize,
}

/// Machine state with the data each phase carries
#[derive(Debug, Clone)]
enum SegmentState {
    Unknown,
    High { start_frame: usize },
    Low { start_frame: usize, low_phase: Vec<TrajectorySample> },
}

/// Repetition segmentation engine
#[derive(Debug, Clone, Copy)]
pub struct RepSegmenter {
    /// Minimum smoothed delta between consecutive samples that counts as movement
    pub movement_threshold: f64,
}

impl RepSegmenter {
    pub fn new(movement_threshold: f64) -> Self {
        Self { movement_threshold }
    }

    pub fn for_squat() -> Self {
        Self::new(SQUAT_MOVEMENT_THRESHOLD)
    }

    /// Segment a smoothed signal into completed repetitions.
    ///
    /// Scans smoothed indices `1..=len-2`. A rep still in its low phase when
    /// the input ends is dropped. Consecutive reps are chained: each one
    /// starts at the previous rep's end frame.
    pub fn segment(&self, signal: &SmoothedSignal) -> Vec<RepSegment> {
        let points = signal.points();
        if points.len() < 3 {
            return Vec::new();
        }

        let mean = signal.mean();
        let threshold = self.movement_threshold;
        let mut state = SegmentState::Unknown;
        let mut reps = Vec::new();

        for i in 1..points.len() - 1 {
            let previous = points[i - 1].value;
            let current = points[i].value;
            let sample = points[i].source;

            state = match state {
                SegmentState::Unknown => {
                    if current < mean {
                        debug!(frame = sample.frame_index, mean, "Reference high position established");
                        SegmentState::High { start_frame: sample.frame_index }
                    } else {
                        SegmentState::Unknown
                    }
                }
                SegmentState::High { start_frame } => {
                    if current > previous + threshold {
                        debug!(frame = sample.frame_index, "Descending edge");
                        SegmentState::Low {
                            start_frame,
                            low_phase: vec![sample],
                        }
                    } else {
                        SegmentState::High { start_frame }
                    }
                }
                SegmentState::Low { start_frame, mut low_phase } => {
                    low_phase.push(sample);

                    if current < previous - threshold {
                        let end_frame = sample.frame_index;
                        let segment = RepSegment {
                            rep_number: reps.len() + 1,
                            start_frame,
                            end_frame,
                            lowest_point_frame: lowest_point_frame(&low_phase),
                        };
                        debug!(
                            rep = segment.rep_number,
                            start = segment.start_frame,
                            end = segment.end_frame,
                            lowest = segment.lowest_point_frame,
                            "Rep completed"
                        );
                        reps.push(segment);
                        SegmentState::High { start_frame: end_frame }
                    } else {
                        SegmentState::Low { start_frame, low_phase }
                    }
                }
            };
        }

        if matches!(state, SegmentState::Low { .. }) {
            debug!("Input ended mid-rep; open rep discarded");
        }

        reps
    }
}

impl Default for RepSegmenter {
    fn default() -> Self {
        Self::for_squat()
    }
}

/// Frame whose raw value is maximal; the first one wins ties.
fn lowest_point_frame(low_phase: &[TrajectorySample]) -> usize {
    let mut lowest = low_phase.first().map_or(0, |s| s.frame_index);
    let mut max_value = f64::NEG_INFINITY;

    for sample in low_phase {
        if sample.value > max_value {
            max_value = sample.value;
            lowest = sample.frame_index;
        }
    }

    lowest
}

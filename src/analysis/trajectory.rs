//! Trajectory Extraction
//!
//! Pulls the vertical position of a tracked body point out of a pose
//! sequence. Frames that cannot supply the point are skipped, not
//! interpolated, and every retained sample remembers its frame number.

use crate::pose::landmarks::{LEFT_WRIST, NOSE, RIGHT_WRIST};
use crate::pose::{PoseFrame, PoseSequence};

/// Minimum samples needed before segmentation is attempted
pub const MIN_TRAJECTORY_SAMPLES: usize = 3;

/// Landmark (or symmetric landmark pair) whose trajectory drives segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedPoint {
    /// One landmark
    Single(usize),
    /// Mean of two landmarks
    Pair(usize, usize),
}

impl TrackedPoint {
    /// Head tracking used for squats
    pub const HEAD: TrackedPoint = TrackedPoint::Single(NOSE);

    /// Wrist tracking used for bench press
    pub const WRISTS: TrackedPoint = TrackedPoint::Pair(LEFT_WRIST, RIGHT_WRIST);

    /// Landmark count a frame needs so every referenced index exists
    pub fn min_landmarks(&self) -> usize {
        match *self {
            TrackedPoint::Single(i) => i + 1,
            TrackedPoint::Pair(a, b) => a.max(b) + 1,
        }
    }

    /// Vertical position of the point in a frame, if it can be read
    pub fn vertical(&self, frame: &PoseFrame) -> Option<f64> {
        if !frame.has_at_least(self.min_landmarks()) {
            return None;
        }
        match *self {
            TrackedPoint::Single(i) => frame.landmark(i).map(|l| l.y),
            TrackedPoint::Pair(a, b) => {
                let (la, lb) = (frame.landmark(a)?, frame.landmark(b)?);
                Some((la.y + lb.y) / 2.0)
            }
        }
    }
}

/// A retained scalar reading and the frame it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub frame_index: usize,
    pub value: f64,
}

/// Raw vertical trajectory, ordered by frame number
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    /// Extract the tracked point's trajectory from a sequence
    pub fn extract(sequence: &PoseSequence, point: TrackedPoint) -> Self {
        let samples = sequence
            .frames()
            .iter()
            .enumerate()
            .filter_map(|(frame_index, frame)| {
                point
                    .vertical(frame)
                    .map(|value| TrajectorySample { frame_index, value })
            })
            .collect();

        Self { samples }
    }

    pub fn from_samples(samples: Vec<TrajectorySample>) -> Self {
        Self { samples }
    }

    /// Build from consecutive values starting at frame 0
    pub fn from_values(values: &[f64]) -> Self {
        let samples = values
            .iter()
            .enumerate()
            .map(|(frame_index, &value)| TrajectorySample { frame_index, value })
            .collect();
        Self { samples }
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether there is enough signal to segment
    pub fn is_sufficient(&self) -> bool {
        self.samples.len() >= MIN_TRAJECTORY_SAMPLES
    }
}

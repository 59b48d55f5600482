//! Moving-Average Smoothing
//!
//! Suppresses frame-to-frame detection jitter in the tracked signal. Only
//! full windows are produced, so the output is `len - window + 1` values,
//! each aligned to the raw sample at the window's centre.

use super::trajectory::{Trajectory, TrajectorySample};

/// Default window width (samples)
pub const DEFAULT_WINDOW: usize = 3;

/// A smoothed value and the raw sample it is aligned to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedPoint {
    /// Window mean
    pub value: f64,
    /// Raw sample at offset `i + window / 2`
    pub source: TrajectorySample,
}

impl SmoothedPoint {
    /// Frame number of the aligned raw sample
    pub fn frame_index(&self) -> usize {
        self.source.frame_index
    }
}

/// Output of the smoother
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmoothedSignal {
    points: Vec<SmoothedPoint>,
}

impl SmoothedSignal {
    pub fn points(&self) -> &[SmoothedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean of all smoothed values (0 for an empty signal)
    pub fn mean(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points.iter().map(|p| p.value).sum::<f64>() / self.points.len() as f64
    }
}

/// Fixed-width centred moving average
#[derive(Debug, Clone, Copy)]
pub struct MovingAverage {
    window: usize,
}

impl MovingAverage {
    /// Create a smoother with the default 3-sample window
    pub fn new() -> Self {
        Self { window: DEFAULT_WINDOW }
    }

    /// Create a smoother with a custom window. The window must be odd so
    /// each mean has a centre sample: 0 becomes 1 and even widths round up.
    pub fn with_window(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window: if window % 2 == 0 { window + 1 } else { window },
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Smooth a trajectory's values; frame alignment is carried along
    pub fn smooth(&self, trajectory: &Trajectory) -> SmoothedSignal {
        let samples = trajectory.samples();
        if samples.len() < self.window {
            return SmoothedSignal::default();
        }

        let centre = self.window / 2;
        let points = samples
            .windows(self.window)
            .map(|w| SmoothedPoint {
                value: w.iter().map(|s| s.value).sum::<f64>() / self.window as f64,
                source: w[centre],
            })
            .collect();

        SmoothedSignal { points }
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new()
    }
}

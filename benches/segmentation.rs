//! Criterion benchmarks for the counting hot path
//!
//! Covers: moving-average smoothing, rep segmentation, and the full
//! squat counter over synthetic multi-rep sessions.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rep_analyzer::analysis::{MovingAverage, RepSegmenter, Trajectory};
use rep_analyzer::pose::landmarks::{LEFT_HIP, LEFT_KNEE, NOSE, RIGHT_HIP, RIGHT_KNEE};
use rep_analyzer::{Landmark, PoseFrame, PoseSequence, SquatCounter};

/// Head height for frame `i` of a session with 30-frame reps
fn head_y(i: usize) -> f64 {
    let phase = (i % 30) as f64 / 30.0 * std::f64::consts::TAU;
    0.5 - 0.15 * phase.cos()
}

fn make_values(count: usize) -> Vec<f64> {
    (0..count).map(head_y).collect()
}

fn make_sequence(count: usize) -> PoseSequence {
    (0..count)
        .map(|i| {
            // Drop every 17th detection to exercise the skip path
            if i % 17 == 16 {
                return PoseFrame::Absent;
            }
            let mut landmarks = vec![Landmark::at(0.5, 0.5); 33];
            landmarks[NOSE].y = head_y(i);
            landmarks[LEFT_HIP].y = 0.9;
            landmarks[RIGHT_HIP].y = 0.9;
            landmarks[LEFT_KNEE] = Landmark::at(0.4, 0.88);
            landmarks[RIGHT_KNEE] = Landmark::at(0.6, 0.88);
            PoseFrame::Detected(landmarks)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Signal benchmarks
// ---------------------------------------------------------------------------

fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("moving_average");

    for count in [300, 3_000, 30_000] {
        let trajectory = Trajectory::from_values(&make_values(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &trajectory, |b, t| {
            let smoother = MovingAverage::new();
            b.iter(|| smoother.smooth(black_box(t)));
        });
    }

    group.finish();
}

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rep_segmentation");

    for count in [300, 3_000, 30_000] {
        let signal = MovingAverage::new().smooth(&Trajectory::from_values(&make_values(count)));
        group.bench_with_input(BenchmarkId::from_parameter(count), &signal, |b, s| {
            let segmenter = RepSegmenter::for_squat();
            b.iter(|| segmenter.segment(black_box(s)));
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// End-to-end
// ---------------------------------------------------------------------------

fn bench_squat_counter(c: &mut Criterion) {
    let mut group = c.benchmark_group("squat_counter");

    for count in [300, 3_000] {
        let sequence = make_sequence(count);
        group.bench_with_input(BenchmarkId::new("session", count), &sequence, |b, seq| {
            let counter = SquatCounter::new();
            b.iter(|| counter.count(black_box(seq)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_smoothing, bench_segmentation, bench_squat_counter);
criterion_main!(benches);

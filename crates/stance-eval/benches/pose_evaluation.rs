//! Benchmarks for per-frame pose evaluation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use stance_core::{
    JointTrackingState, JointType, Position3D, SkeletonFrame, SkeletonSample,
    SkeletonTrackingState, Timestamp,
};
use stance_eval::{FrameEvaluator, PoseThresholds, PredicateSet};

fn create_test_sample(tracking_id: u32, ankle_spread: f64) -> SkeletonSample {
    SkeletonSample::from_fn(tracking_id, SkeletonTrackingState::Tracked, |jt| {
        let (x, y) = match jt {
            JointType::Head => (0.0, 0.7),
            JointType::ShoulderCenter => (0.0, 0.5),
            JointType::ShoulderLeft => (-0.2, 0.5),
            JointType::ShoulderRight => (0.2, 0.5),
            JointType::WristLeft => (-0.19, 0.01),
            JointType::WristRight => (0.2, -0.02),
            JointType::AnkleLeft => (-ankle_spread / 2.0, -1.0),
            JointType::AnkleRight => (ankle_spread / 2.0, -1.0),
            _ => (0.0, 0.0),
        };
        (Position3D::new(x, y, 2.0), JointTrackingState::Tracked)
    })
}

fn benchmark_predicates(c: &mut Criterion) {
    let thresholds = PoseThresholds::default();
    let together = create_test_sample(1, 0.0);
    let apart = create_test_sample(1, 0.7);

    c.bench_function("predicates_feet_together", |b| {
        b.iter(|| PredicateSet::evaluate(black_box(&together), &thresholds))
    });

    c.bench_function("predicates_feet_apart", |b| {
        b.iter(|| PredicateSet::evaluate(black_box(&apart), &thresholds))
    });
}

fn benchmark_frame(c: &mut Criterion) {
    let evaluator = FrameEvaluator::default();

    // The sensor tracks at most two full skeletons per frame
    let frame = SkeletonFrame::new(
        0,
        Timestamp::from_nanos(0),
        vec![create_test_sample(1, 0.0), create_test_sample(2, 0.7)],
    );

    c.bench_function("evaluate_frame_two_skeletons", |b| {
        b.iter(|| evaluator.evaluate_frame(black_box(&frame)))
    });
}

criterion_group!(benches, benchmark_predicates, benchmark_frame);
criterion_main!(benches);

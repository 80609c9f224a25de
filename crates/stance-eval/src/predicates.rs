//! Geometric predicates over a single skeleton sample.
//!
//! All predicates work in sensor space and read the sample only. Leg
//! predicates need HipCenter, AnkleLeft and AnkleRight tracked and report
//! `false` otherwise; the arm predicate reads positions as reported.

use serde::{Deserialize, Serialize};
use stance_core::{
    angular_tolerance, within_band, within_range, Axis, JointType, Position3D, SkeletonSample,
};

use crate::thresholds::PoseThresholds;

/// (shoulder, wrist) per side
const ARMS: [(JointType, JointType); 2] = [
    (JointType::ShoulderLeft, JointType::WristLeft),
    (JointType::ShoulderRight, JointType::WristRight),
];

const LEG_JOINTS: [JointType; 3] = [
    JointType::HipCenter,
    JointType::AnkleLeft,
    JointType::AnkleRight,
];

/// Body upright and both arms hanging under the shoulders, default thresholds
pub fn is_arms_relaxed_aligned(sample: &SkeletonSample) -> bool {
    is_arms_relaxed_aligned_with(sample, &PoseThresholds::default())
}

/// Both ankles under the hip centre, default thresholds
pub fn are_legs_together(sample: &SkeletonSample) -> bool {
    are_legs_together_with(sample, &PoseThresholds::default())
}

/// Ankles spread to the target leg angle, default thresholds
pub fn are_legs_apart(sample: &SkeletonSample) -> bool {
    are_legs_apart_with(sample, &PoseThresholds::default())
}

pub fn is_arms_relaxed_aligned_with(sample: &SkeletonSample, thresholds: &PoseThresholds) -> bool {
    is_body_aligned(sample, thresholds.body_alignment)
        && ARMS.iter().all(|(shoulder, wrist)| {
            is_arm_relaxed(
                sample[*shoulder].position,
                sample[*wrist].position,
                sample[JointType::HipCenter].position,
                thresholds.arm_angle_degrees,
            )
        })
}

pub fn are_legs_together_with(sample: &SkeletonSample, thresholds: &PoseThresholds) -> bool {
    let Some(legs) = LegGeometry::from_sample(sample) else {
        return false;
    };
    let tolerance = angular_tolerance(legs.vertical_drop, thresholds.leg_angle_degrees);

    within_band(legs.left_ankle.x, legs.hip.x, tolerance)
        && within_band(legs.right_ankle.x, legs.hip.x, tolerance)
}

pub fn are_legs_apart_with(sample: &SkeletonSample, thresholds: &PoseThresholds) -> bool {
    let Some(legs) = LegGeometry::from_sample(sample) else {
        return false;
    };
    let tolerance = angular_tolerance(legs.vertical_drop, thresholds.leg_angle_degrees);
    let spread_target = angular_tolerance(legs.vertical_drop, thresholds.leg_spread_degrees);
    let separation = (legs.right_ankle.x - legs.left_ankle.x).abs();

    within_range(
        separation,
        spread_target - tolerance,
        spread_target + tolerance,
    )
}

/// Head over shoulder centre over hip centre, horizontally
fn is_body_aligned(sample: &SkeletonSample, tolerance: f64) -> bool {
    let head = sample[JointType::Head].position;
    let shoulder_center = sample[JointType::ShoulderCenter].position;
    let hip_center = sample[JointType::HipCenter].position;

    within_band(head.x, shoulder_center.x, tolerance)
        && within_band(shoulder_center.x, hip_center.x, tolerance)
}

/// Wrist against its shoulder projected down to hip-centre height. The band
/// widens with the shoulder's horizontal offset from the hip centre.
fn is_arm_relaxed(
    shoulder: Position3D,
    wrist: Position3D,
    hip_center: Position3D,
    degrees: f64,
) -> bool {
    let rest = shoulder.projected_onto(&hip_center, Axis::Y);
    let tolerance = angular_tolerance((shoulder.x - hip_center.x).abs(), degrees);

    within_band(wrist.x, rest.x, tolerance) && within_band(wrist.y, rest.y, tolerance)
}

struct LegGeometry {
    hip: Position3D,
    left_ankle: Position3D,
    right_ankle: Position3D,
    /// Hip height above the left ankle; zero or negative is kept as-is
    vertical_drop: f64,
}

impl LegGeometry {
    fn from_sample(sample: &SkeletonSample) -> Option<Self> {
        if let Err(e) = sample.require_tracked(&LEG_JOINTS) {
            tracing::trace!(tracking_id = sample.tracking_id(), "leg check skipped: {}", e);
            return None;
        }

        let hip = sample[JointType::HipCenter].position;
        let left_ankle = sample[JointType::AnkleLeft].position;
        let right_ankle = sample[JointType::AnkleRight].position;

        Some(Self {
            hip,
            left_ankle,
            right_ankle,
            vertical_drop: hip.y - left_ankle.y,
        })
    }
}

/// The three predicate outcomes for one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredicateSet {
    pub arms_aligned: bool,
    pub legs_together: bool,
    pub legs_apart: bool,
}

impl PredicateSet {
    pub fn new(arms_aligned: bool, legs_together: bool, legs_apart: bool) -> Self {
        Self {
            arms_aligned,
            legs_together,
            legs_apart,
        }
    }

    pub fn evaluate(sample: &SkeletonSample, thresholds: &PoseThresholds) -> Self {
        Self {
            arms_aligned: is_arms_relaxed_aligned_with(sample, thresholds),
            legs_together: are_legs_together_with(sample, thresholds),
            legs_apart: are_legs_apart_with(sample, thresholds),
        }
    }
}

//! Per-frame evaluation of every tracked skeleton.

use serde::{Deserialize, Serialize};
use stance_core::{Result, SkeletonFrame, SkeletonSample, Timestamp};

use crate::classifier::{PoseEvaluation, PoseVerdict};
use crate::predicates::PredicateSet;
use crate::thresholds::PoseThresholds;

/// Evaluates frames against the reference poses.
///
/// Holds only its thresholds; nothing carries from one frame to the next.
#[derive(Debug, Clone, Default)]
pub struct FrameEvaluator {
    thresholds: PoseThresholds,
}

impl FrameEvaluator {
    pub fn new(thresholds: PoseThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &PoseThresholds {
        &self.thresholds
    }

    /// Evaluate a single sample
    pub fn evaluate(&self, sample: &SkeletonSample) -> PoseEvaluation {
        let predicates = PredicateSet::evaluate(sample, &self.thresholds);
        let evaluation = PoseEvaluation::from_predicates(predicates);

        tracing::debug!(
            tracking_id = sample.tracking_id(),
            arms = predicates.arms_aligned,
            together = predicates.legs_together,
            apart = predicates.legs_apart,
            "verdict {:?}",
            evaluation.verdict
        );

        evaluation
    }

    /// Evaluate every fully tracked skeleton in the frame, in frame order
    pub fn evaluate_frame(&self, frame: &SkeletonFrame) -> FrameEvaluation {
        let skeletons = frame
            .tracked_skeletons()
            .map(|sample| SkeletonEvaluation {
                tracking_id: sample.tracking_id(),
                evaluation: self.evaluate(sample),
            })
            .collect();

        FrameEvaluation {
            frame_number: frame.frame_number,
            timestamp: frame.timestamp,
            skeletons,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkeletonEvaluation {
    pub tracking_id: u32,
    pub evaluation: PoseEvaluation,
}

/// Evaluation results for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameEvaluation {
    pub frame_number: u64,
    pub timestamp: Timestamp,
    pub skeletons: Vec<SkeletonEvaluation>,
}

impl FrameEvaluation {
    /// Verdict of the first evaluated skeleton carrying `tracking_id`
    pub fn verdict_for(&self, tracking_id: u32) -> Option<PoseVerdict> {
        self.skeletons
            .iter()
            .find(|s| s.tracking_id == tracking_id)
            .map(|s| s.evaluation.verdict)
    }

    pub fn is_empty(&self) -> bool {
        self.skeletons.is_empty()
    }
}

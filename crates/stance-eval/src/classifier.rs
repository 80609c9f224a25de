//! Three-way pose verdict from the predicate outcomes.

use serde::{Deserialize, Serialize};

use crate::predicates::PredicateSet;

/// How well a skeleton matches one of the reference poses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoseVerdict {
    /// Arms aligned and exactly one leg configuration matched
    Correct,
    /// One requirement short of a reference pose
    Close,
    Incorrect,
}

impl PoseVerdict {
    pub fn description(&self) -> &'static str {
        match self {
            PoseVerdict::Correct => "Correct - pose matched",
            PoseVerdict::Close => "Close - one adjustment away",
            PoseVerdict::Incorrect => "Incorrect - pose not matched",
        }
    }
}

/// The reference pose a Correct verdict matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetPose {
    /// Arms relaxed, ankles together under the hips
    FeetTogether,
    /// Arms relaxed, legs open at the spread angle
    FeetApart,
}

/// Fold the three predicates into a verdict.
///
/// Both leg predicates holding at once only happens with degenerate leg
/// geometry and is never rewarded.
pub fn classify(predicates: &PredicateSet) -> PoseVerdict {
    match (
        predicates.arms_aligned,
        predicates.legs_together,
        predicates.legs_apart,
    ) {
        (true, true, false) => PoseVerdict::Correct,
        (true, false, true) => PoseVerdict::Correct,
        (true, false, false) => PoseVerdict::Close,
        (false, true, false) => PoseVerdict::Close,
        (false, false, true) => PoseVerdict::Close,
        (true, true, true) => PoseVerdict::Incorrect,
        (false, true, true) => PoseVerdict::Incorrect,
        (false, false, false) => PoseVerdict::Incorrect,
    }
}

/// Which reference pose the predicates match, if fully matched
pub fn matched_pose(predicates: &PredicateSet) -> Option<TargetPose> {
    match classify(predicates) {
        PoseVerdict::Correct if predicates.legs_together => Some(TargetPose::FeetTogether),
        PoseVerdict::Correct => Some(TargetPose::FeetApart),
        PoseVerdict::Close | PoseVerdict::Incorrect => None,
    }
}

/// Predicates and verdict for one skeleton in one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseEvaluation {
    pub predicates: PredicateSet,
    pub verdict: PoseVerdict,
    pub matched_pose: Option<TargetPose>,
}

impl PoseEvaluation {
    pub fn from_predicates(predicates: PredicateSet) -> Self {
        Self {
            predicates,
            verdict: classify(&predicates),
            matched_pose: matched_pose(&predicates),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_table_is_total() {
        let expected = [
            ((true, true, false), PoseVerdict::Correct),
            ((true, false, true), PoseVerdict::Correct),
            ((true, false, false), PoseVerdict::Close),
            ((false, true, false), PoseVerdict::Close),
            ((false, false, true), PoseVerdict::Close),
            ((true, true, true), PoseVerdict::Incorrect),
            ((false, true, true), PoseVerdict::Incorrect),
            ((false, false, false), PoseVerdict::Incorrect),
        ];

        for ((a, t, o), verdict) in expected {
            assert_eq!(
                classify(&PredicateSet::new(a, t, o)),
                verdict,
                "A={a} T={t} O={o}"
            );
        }
    }

    #[test]
    fn test_matched_pose() {
        assert_eq!(
            matched_pose(&PredicateSet::new(true, true, false)),
            Some(TargetPose::FeetTogether)
        );
        assert_eq!(
            matched_pose(&PredicateSet::new(true, false, true)),
            Some(TargetPose::FeetApart)
        );
        assert_eq!(matched_pose(&PredicateSet::new(true, true, true)), None);
        assert_eq!(matched_pose(&PredicateSet::new(false, true, false)), None);
    }

    #[test]
    fn test_evaluation_serializes() {
        let eval = PoseEvaluation::from_predicates(PredicateSet::new(true, false, false));
        assert_eq!(eval.verdict, PoseVerdict::Close);

        let json = serde_json::to_string(&eval).unwrap();
        assert!(json.contains("\"verdict\":\"Close\""));
    }
}

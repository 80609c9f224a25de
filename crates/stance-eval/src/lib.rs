//! # Stance-Eval
//!
//! Pose classification for depth-camera skeletons.
//!
//! ## Reference Poses
//!
//! Two target poses are recognised, both with the body upright and the arms
//! hanging relaxed at the sides:
//!
//! 1. **Feet together** - both ankles directly under the hip centre
//! 2. **Feet apart** - ankles spread so the legs open at 35°
//!
//! ## Predicates
//!
//! Each frame, three boolean facts are computed from a [`SkeletonSample`]:
//!
//! - **Arms aligned**: head, shoulder centre and hip centre stacked, and each
//!   wrist within a 9° band of the point under its shoulder at hip height
//! - **Legs together**: both ankles within a 4.5° band under the hip centre
//! - **Legs apart**: ankle separation within 4.5° of the 35° spread
//!
//! The [`classify`] table folds them into a [`PoseVerdict`].
//!
//! [`SkeletonSample`]: stance_core::SkeletonSample

pub mod classifier;
pub mod evaluator;
pub mod predicates;
pub mod thresholds;

pub use classifier::*;
pub use evaluator::*;
pub use predicates::*;
pub use thresholds::*;

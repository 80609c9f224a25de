//! Reference pose geometry.
//!
//! The values are fixed configuration, not per-user calibration. They are
//! kept as shipped rather than re-derived.

use serde::{Deserialize, Serialize};
use stance_core::{Error, Result};

/// Max horizontal offset (sensor units) between head, shoulder centre and hip centre
pub const BODY_ALIGNMENT_TOLERANCE: f64 = 0.05;

/// Arm band half-angle
pub const ARM_ANGLE_TOLERANCE_DEGREES: f64 = 9.0;

/// Leg band half-angle, shared by the together and apart checks
pub const LEG_ANGLE_TOLERANCE_DEGREES: f64 = 4.5;

/// Opening of the legs in the feet-apart pose
pub const LEG_SPREAD_TARGET_DEGREES: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseThresholds {
    pub body_alignment: f64,
    pub arm_angle_degrees: f64,
    pub leg_angle_degrees: f64,
    pub leg_spread_degrees: f64,
}

impl Default for PoseThresholds {
    fn default() -> Self {
        Self {
            body_alignment: BODY_ALIGNMENT_TOLERANCE,
            arm_angle_degrees: ARM_ANGLE_TOLERANCE_DEGREES,
            leg_angle_degrees: LEG_ANGLE_TOLERANCE_DEGREES,
            leg_spread_degrees: LEG_SPREAD_TARGET_DEGREES,
        }
    }
}

impl PoseThresholds {
    pub fn validate(&self) -> Result<()> {
        if !self.body_alignment.is_finite() || self.body_alignment < 0.0 {
            return Err(Error::Config(format!(
                "body_alignment must be a non-negative number, got {}",
                self.body_alignment
            )));
        }

        for (name, degrees) in [
            ("arm_angle_degrees", self.arm_angle_degrees),
            ("leg_angle_degrees", self.leg_angle_degrees),
            ("leg_spread_degrees", self.leg_spread_degrees),
        ] {
            if !(0.0..90.0).contains(&degrees) {
                return Err(Error::Config(format!(
                    "{name} must be in [0, 90), got {degrees}"
                )));
            }
        }

        Ok(())
    }
}

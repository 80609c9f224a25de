//! Geometric utilities for tolerance-banded joint comparisons.

use serde::{Deserialize, Serialize};

use crate::types::Position3D;

/// Sensor-space axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Position3D {
    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// This point with one coordinate taken from `reference`
    pub fn projected_onto(&self, reference: &Position3D, axis: Axis) -> Position3D {
        let mut p = *self;
        match axis {
            Axis::X => p.x = reference.x,
            Axis::Y => p.y = reference.y,
            Axis::Z => p.z = reference.z,
        }
        p
    }
}

/// Half-width of the band an angle of `degrees` opens at `length` from its apex.
///
/// Negative `length` gives a negative width, which no band check can satisfy.
pub fn angular_tolerance(length: f64, degrees: f64) -> f64 {
    length * degrees.to_radians().tan()
}

/// `|value - center| <= tolerance`
pub fn within_band(value: f64, center: f64, tolerance: f64) -> bool {
    (value - center).abs() <= tolerance
}

/// `low <= value <= high`
pub fn within_range(value: f64, low: f64, high: f64) -> bool {
    value >= low && value <= high
}

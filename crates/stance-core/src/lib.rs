//! # Stance-Core
//!
//! Core types and utilities for the Stance depth-camera pose evaluator.
//!
//! A [`SkeletonSample`] is one body as reported by the sensor for a single
//! frame: every joint of the fixed 20-joint topology, each with a position in
//! sensor space (metres, Y up) and a tracking tag. Samples are immutable and
//! owned by the frame that carried them.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use types::*;

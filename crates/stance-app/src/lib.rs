//! # Stance-App
//!
//! Wires a skeleton source to the evaluator and the overlay renderer.
//!
//! ## Flow
//!
//! 1. A [`SkeletonSource`] yields [`SkeletonFrame`](stance_core::SkeletonFrame)s
//! 2. [`FramePipeline`] evaluates every tracked skeleton against the reference poses
//! 3. The frame is drawn into a display list coloured by each skeleton's verdict
//!
//! Configuration comes from a TOML file and/or `STANCE_*` environment
//! variables (`STANCE_SENSOR__TRACKING_MODE=seated`), see [`StanceConfig`].

pub mod config;
pub mod pipeline;
pub mod sensor;

pub use config::*;
pub use pipeline::*;
pub use sensor::*;

//! # Stance-Render
//!
//! Stick-figure overlay for evaluated skeleton frames.
//!
//! The renderer never touches a window or GPU. It emits rectangle, ellipse
//! and line commands into a [`DrawingContext`] and maps sensor-space points
//! through a [`ScreenMapper`]; the presentation surface behind both is
//! supplied by the caller.

pub mod drawing;
pub mod projection;
pub mod skeletal;

pub use drawing::*;
pub use projection::*;
pub use skeletal::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render surface: {width}x{height}")]
    InvalidSurface { width: f64, height: f64 },

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),
}

pub type RenderResult<T> = Result<T, RenderError>;
